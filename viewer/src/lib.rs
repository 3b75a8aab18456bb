//! 数据库查看器
//!
//! 按“选择数据库 → 选择表 → 选择列 → 查看数据”四步浏览列数据：
//! - 向导控制器维护视图状态并调用数据访问客户端
//! - 统一的失败策略决定忙碌指示与错误提示
//! - 请求票据丢弃过期响应

pub mod alert;
pub mod cli;
pub mod controller;
pub mod policy;
pub mod state;
pub mod tickets;

pub use alert::{Alert, AlertQueue, AlertSink};
pub use controller::WizardController;
pub use policy::{ErrorSurface, FailurePolicy, Operation, PolicyTable};
pub use state::{Selection, ViewState, WizardStage};
