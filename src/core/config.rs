#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-sized capacity for each table's row map and its indexes.
    pub initial_row_capacity: usize,
    /// When false, scan/seek counters are left at zero.
    pub collect_access_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_row_capacity: 1024,
            collect_access_stats: true,
        }
    }
}
