//! 日志路径管理
//!
//! stdout 被插件协议占用，日志写入应用数据目录：
//! - macOS: ~/Library/Application Support/filepathbar/logs
//! - Windows: %APPDATA%\filepathbar\logs
//! - 其他: $XDG_DATA_HOME/filepathbar/logs 或 ~/.local/share/filepathbar/logs

use std::path::PathBuf;

const APP_NAME: &str = "filepathbar";
const LOG_DIR: &str = "logs";

fn data_home() -> Option<PathBuf> {
    let home = || std::env::var_os("HOME").map(PathBuf::from);
    if cfg!(target_os = "macos") {
        home().map(|home| home.join("Library/Application Support"))
    } else if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home().map(|home| home.join(".local/share")))
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    data_home().map(|dir| dir.join(APP_NAME).join(LOG_DIR))
}

/// 确保日志目录存在
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
