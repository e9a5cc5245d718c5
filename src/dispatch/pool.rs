// src/dispatch/pool.rs
// =============================================================================
// This module owns the concurrent heart of the tool: a fixed-size worker
// pool draining a shared task queue and funneling outcomes into a single
// result channel.
//
// How the run is wired:
// 1. dispatch() fills a bounded task queue with every URL template,
//    then closes it - closing the queue is the only stop signal
// 2. N workers race to claim tasks; each executes its task and pushes
//    one Outcome into the result channel
// 3. A closer task waits for ALL workers to finish, then closes the
//    result channel so the consumer's loop ends deterministically
//
// Rust concepts:
// - Channels: Queues that move values between tasks safely
// - tokio::spawn: Launches a task that runs concurrently
// - Generics: The pool works with any executor, real or stubbed
// =============================================================================

use std::future::Future;

use futures::future;
use tokio::sync::mpsc;

use crate::dispatch::executor::Outcome;

// Seeds the task queue, starts the pool, and returns the result channel
//
// Parameters:
//   templates: every URL template for this run (consumed)
//   worker_count: how many workers pull from the queue concurrently
//   executor: turns one claimed template into one Outcome
//
// Returns: the receiving end of the result channel. The caller drains
// it until it closes, which happens exactly when every template has
// produced its outcome.
//
// The executor is a plain async closure rather than a hardcoded HTTP
// call so tests can substitute a stub that never touches the network.
pub async fn dispatch<E, Fut>(
    templates: Vec<String>,
    worker_count: usize,
    executor: E,
) -> mpsc::Receiver<Outcome>
where
    E: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Outcome> + Send + 'static,
{
    let total = templates.len();

    // Both queues are sized to the full run, so seeding never blocks
    // and workers never block pushing results.
    // (.max(1) because a bounded channel needs capacity of at least one)
    let (task_tx, task_rx) = async_channel::bounded::<String>(total.max(1));
    let (result_tx, result_rx) = mpsc::channel::<Outcome>(total.max(1));

    // Start the workers first so they begin draining while we seed
    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        workers.push(tokio::spawn(worker(
            task_rx.clone(),
            result_tx.clone(),
            executor.clone(),
        )));
    }
    // The workers hold their own handles to the queue now
    drop(task_rx);

    // Seed every template. This only fails if every worker has already
    // given up (result channel gone), in which case feeding more tasks
    // is pointless
    for template in templates {
        if task_tx.send(template).await.is_err() {
            break;
        }
    }
    // Closing the task queue: once it drains, each worker's recv()
    // starts failing and its loop ends
    drop(task_tx);

    // Completion barrier: no worker closes the result channel itself.
    // This closer waits until every worker has exited, then drops the
    // last sender - guaranteeing nothing is pushed after closure
    tokio::spawn(async move {
        let _ = future::join_all(workers).await;
        drop(result_tx);
    });

    result_rx
}

// One worker: claim, execute, report, repeat
//
// The loop ends in exactly two cases:
// - recv() fails: the task queue is closed AND empty (normal shutdown)
// - send() fails: the result consumer went away (nothing left to do)
async fn worker<E, Fut>(
    tasks: async_channel::Receiver<String>,
    results: mpsc::Sender<Outcome>,
    executor: E,
) where
    E: Fn(String) -> Fut,
    Fut: Future<Output = Outcome>,
{
    while let Ok(template) = tasks.recv().await {
        let outcome = executor(template).await;
        if results.send(outcome).await.is_err() {
            break;
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two different channel crates?
//    - The task queue has many consumers (every worker claims from it),
//      and tokio's mpsc receiver can't be shared - it's single-consumer
//    - async-channel gives us a multi-consumer queue where each task
//      is still delivered to exactly ONE worker
//    - The result channel is the opposite shape (many producers, one
//      consumer), which is exactly what tokio's mpsc is for
//
// 2. What closes a channel?
//    - Dropping the last sender. There's no explicit close() call
//    - That's why dispatch() drops task_tx after seeding, and why the
//      closer task exists: it holds the original result_tx hostage
//      until join_all() proves every worker is done
//
// 3. Why does each worker get clones?
//    - Channel endpoints and the executor are cheap to clone (they're
//      reference-counted handles internally)
//    - Each spawned task must own its captures ('static lifetime)
//
// 4. What is join_all?
//    - Takes a list of futures (here: the workers' JoinHandles) and
//      completes when all of them have completed
//    - The async equivalent of joining every thread in a pool
// -----------------------------------------------------------------------------
