pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size allowed for processing (10MB)
        /// SECURITY: Prevents DoS attacks via large file uploads
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        /// PERFORMANCE: Affects whether per-file timing is reported
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count accepted for resolution
        /// SECURITY: Prevents algorithmic complexity attacks
        pub const MAX_LINE_COUNT: usize = 500_000;

        /// Maximum line length retained before truncation warnings
        /// RESOURCE: Limits per-line memory consumption
        pub const MAX_LINE_LENGTH: usize = 10_000;
    }

    pub mod resolution {
        /// Lines searched above a standalone marker for the value line
        pub const VALUE_SEARCH_WINDOW: usize = 3;

        /// Lines searched above the value line for an S/B criteria line
        pub const CRITERIA_SEARCH_WINDOW: usize = 10;

        /// Lines searched above the value line for a cross-referenced parameter
        pub const REFERENCE_SEARCH_WINDOW: usize = 20;

        /// Maximum members produced when expanding an integer range in a set
        /// SECURITY: Prevents memory exhaustion via huge range expansions
        pub const MAX_SET_EXPANSION: usize = 512;

        /// Maximum width of a single octet group in a dual-range criterion
        pub const MAX_OCTET_WIDTH: usize = 3;

        /// Maximum criteria text length accepted by the classifier
        /// RESOURCE: Limits regex engine work per instance
        pub const MAX_CRITERIA_LENGTH: usize = 1_000;

        /// Maximum tracked parameters per file in the state store
        /// SECURITY: Prevents memory exhaustion via parameter explosion
        pub const MAX_TRACKED_PARAMETERS: usize = 50_000;
    }

    pub mod logging {
        /// Log buffer size for in-memory event capture
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum log events recorded per processed file
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;
    }
}
