//! 配置服务：解析插件的两个配置项
//!
//! 每次读取都直接询问宿主，不在配置变更通知之间缓存旧值。
//! 无法识别的值回退到默认值。

use serde::de::DeserializeOwned;

use crate::kernel::path_style::PathStyle;
use crate::kernel::services::ports::config::{
    Alignment, ConfigSource, PATH_STYLE_KEY, STATUS_BAR_ALIGNMENT_KEY,
};

pub struct ConfigStore<'a, S: ConfigSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ConfigSource + ?Sized> ConfigStore<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn alignment(&self) -> Alignment {
        self.read(STATUS_BAR_ALIGNMENT_KEY)
    }

    pub fn path_style(&self) -> PathStyle {
        self.read(PATH_STYLE_KEY)
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(value) = self.source.configuration(key) else {
            return T::default();
        };
        match serde_json::from_value::<T>(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(key, error = %e, "unrecognized configuration value, using default");
                T::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
