//! 适配器配置，可以从TOML文件加载
//!
//! ```toml
//! access_key_id = "Your AccessKey ID"
//! access_key_secret = "Your AccessKey Secret"
//! endpoint = "oss-cn-hangzhou.aliyuncs.com"
//! bucket = "for-rs-test"
//! prefix = "uploads"
//! timeout = 60
//!
//! [options]
//! storage_class = "IA"
//! check_md5 = true
//!
//! [options.headers]
//! Cache-Control = "max-age=3600"
//! ```

use crate::adapter::OssOptions;
use serde_derive::Deserialize;
use std::{path::Path, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置文件失败：{0}")]
    Io(#[from] std::io::Error),
    #[error("解析配置文件失败：{0}")]
    Toml(#[from] toml::de::Error),
    #[error("配置项 {0} 不能为空")]
    Invalid(&'static str),
    #[error("配置项 {0} 和 {1} 不能同时使用")]
    Conflict(&'static str, &'static str),
}

fn default_use_ssl() -> bool {
    true
}

/// 适配器配置
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AdapterConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub endpoint: String,
    pub bucket: String,
    /// 所有文件Key的公共前缀
    #[serde(default)]
    pub prefix: String,
    /// STS临时授权的SecurityToken
    #[serde(default)]
    pub security_token: Option<String>,
    /// endpoint是否为绑定到存储空间的自定义域名，不能和 `internal` 同时使用
    #[serde(default)]
    pub is_cname: bool,
    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,
    /// 单次请求的超时时间，单位秒
    #[serde(default)]
    pub timeout: Option<u64>,
    /// 建立连接的超时时间，单位秒
    #[serde(default)]
    pub connect_timeout: Option<u64>,
    /// 生成文件访问地址时使用的自定义域名
    #[serde(default)]
    pub domain: Option<String>,
    /// 内网endpoint，设置后请求走内网，生成的url仍然使用外网域名
    #[serde(default)]
    pub internal: Option<String>,
    /// 默认的请求选项
    #[serde(default)]
    pub options: OssOptions,
}

impl AdapterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AdapterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
    /// 检查必填项，以及互相冲突的配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("access_key_id", &self.access_key_id),
            ("access_key_secret", &self.access_key_secret),
            ("endpoint", &self.endpoint),
            ("bucket", &self.bucket),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(name));
            }
        }
        //自定义域名无法对应内网endpoint
        if self.is_cname && self.internal.is_some() {
            return Err(ConfigError::Conflict("is_cname", "internal"));
        }
        Ok(())
    }
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }
    /// 发起请求使用的endpoint
    pub fn request_endpoint(&self) -> &str {
        self.internal.as_deref().unwrap_or(&self.endpoint)
    }
}
