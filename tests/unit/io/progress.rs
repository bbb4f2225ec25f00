//! Tests for generation progress display

#[cfg(test)]
mod tests {
    use edgematch::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use edgematch::io::progress::ProgressManager;

    // Tests a manager can be finished without being initialized
    // Verified by unwrapping the board bar in finish
    #[test]
    fn test_finish_uninitialized() {
        let pm = ProgressManager::new();
        assert_eq!(pm.worker_lines(), 0);
        pm.finish();
    }

    // Tests one spinner per worker up to the display limit
    // Verified by creating a spinner for every worker
    #[test]
    fn test_worker_lines_capped() {
        let mut pm = ProgressManager::default();
        pm.initialize(2, 1);
        assert_eq!(pm.worker_lines(), 2);
        pm.finish();

        let mut pm = ProgressManager::new();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 3, 4);
        assert_eq!(pm.worker_lines(), MAX_INDIVIDUAL_PROGRESS_BARS);
        pm.finish();
    }

    // Tests updates for workers without a line are ignored
    // Verified by indexing the worker bars directly
    #[test]
    fn test_updates_beyond_display() {
        let mut pm = ProgressManager::new();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 1, 2);

        pm.update_worker(0, 256);
        pm.update_worker(MAX_INDIVIDUAL_PROGRESS_BARS, 512);
        pm.board_found(0, 300, 8);
        pm.board_found(MAX_INDIVIDUAL_PROGRESS_BARS, 600, 1);
        pm.finish();
    }
}
