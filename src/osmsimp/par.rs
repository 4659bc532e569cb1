use std::thread;

/// Maps `f` over `items` on one worker per CPU, keeping input order.
/// Each worker gets one contiguous chunk.
pub fn map_ordered<T, U, F>(items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync,
{
    let num_workers = num_cpus::get().max(1);
    if items.len() < 2 || num_workers == 1 {
        return items.into_iter().map(f).collect();
    }

    let chunk_size = (items.len() + num_workers - 1) / num_workers;
    let mut chunks: Vec<Vec<T>> = Vec::with_capacity(num_workers);
    let mut rest = items.into_iter().peekable();
    while rest.peek().is_some() {
        chunks.push(rest.by_ref().take(chunk_size).collect());
    }
    log::debug!("Mapping {} chunks of up to {} items", chunks.len(), chunk_size);

    let f = &f;
    thread::scope(|s| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| s.spawn(move || chunk.into_iter().map(f).collect::<Vec<U>>()))
            .collect();

        let mut results = Vec::new();
        for h in handles {
            match h.join() {
                Ok(chunk) => results.extend(chunk),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        results
    })
}
