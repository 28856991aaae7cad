//! filepathbar - 状态栏文件路径插件库
//!
//! 模块结构：
//! - core: 插件向宿主暴露的命令
//! - kernel: 无头核心（文档状态、状态栏、快捷菜单、窗口标题、本地化）
//! - kernel::services: 宿主端口（ports）与适配器（adapters）

pub mod core;
pub mod kernel;
