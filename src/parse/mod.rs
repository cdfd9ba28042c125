//! 测量工具输出解析
//!
//! 此模块把时延探测工具（fping 风格）的文本行和吞吐测试工具（iperf3 风格）
//! 的 JSON 结果解析为带时间戳的结构化记录。

// 子模块声明
mod error;
mod interval;
mod probe;
mod stream;

// 重新导出公共接口
pub use error::ParseError;
pub use interval::{IntervalSample, intervals};
pub use probe::{ProbeRecord, parse_probe_line};
pub use stream::{interval_records, probe_records};
