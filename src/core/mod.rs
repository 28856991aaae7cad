//! 核心定义
//!
//! - Command: 插件注册到宿主命令表的命令

pub mod command;

pub use command::Command;
