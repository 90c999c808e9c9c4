//! 日誌初始化（tracing-subscriber）

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日誌
///
/// 日誌級別由 `RUST_LOG` 控制（預設 info），例如 `RUST_LOG=shipalloc_optimizer=debug`。
/// 日誌寫到 stderr，stdout 保留給輸出表。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 測試用日誌（debug 級別，可重複呼叫）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
