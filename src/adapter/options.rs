use crate::{
    common::{Acl, StorageClass},
    store::PutOptions,
};
use serde_derive::Deserialize;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// 文件的可见性，对应OSS的ACL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// 公开映射为public-read，其余为private
    pub fn to_acl(self) -> Acl {
        match self {
            Visibility::Public => Acl::PublicRead,
            Visibility::Private => Acl::Private,
        }
    }
    /// 只有private映射为私有，default和公共读写都视为公开
    pub fn from_acl(acl: Acl) -> Self {
        match acl {
            Acl::Private => Visibility::Private,
            _ => Visibility::Public,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::Private => f.write_str("private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("未知的可见性：{}", other)),
        }
    }
}

/// OSS请求选项，可以在适配器级别设置默认值，也可以在单次调用时覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OssOptions {
    /// 附加的请求头
    pub headers: BTreeMap<String, String>,
    /// 文件的存储类型
    pub storage_class: Option<StorageClass>,
    /// 上传时携带Content-MD5
    pub check_md5: Option<bool>,
}

impl OssOptions {
    /// 合并选项，`other` 中设置的值优先，请求头按key合并
    pub fn merge(&self, other: &OssOptions) -> OssOptions {
        let mut headers = self.headers.clone();
        headers.extend(other.headers.clone());
        OssOptions {
            headers,
            storage_class: other.storage_class.or(self.storage_class),
            check_md5: other.check_md5.or(self.check_md5),
        }
    }
}

/// 单次调用的配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub options: OssOptions,
    pub headers: BTreeMap<String, String>,
    pub visibility: Option<Visibility>,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
    pub fn set_options(mut self, options: OssOptions) -> Self {
        self.options = options;
        self
    }
    pub fn set_header(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
    pub fn set_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }
}

// 合并顺序：适配器默认选项、调用选项、调用请求头、可见性
pub(crate) fn merge_config(defaults: &OssOptions, config: &Config) -> PutOptions {
    let options = defaults.merge(&config.options);
    let mut headers = BTreeMap::new();
    for (key, value) in options.headers.into_iter().chain(config.headers.clone()) {
        headers.insert(key.to_ascii_lowercase(), value);
    }
    if let Some(storage_class) = options.storage_class {
        headers.insert("x-oss-storage-class".to_owned(), storage_class.to_string());
    }
    if let Some(visibility) = config.visibility {
        headers.insert("x-oss-object-acl".to_owned(), visibility.to_acl().to_string());
    }
    PutOptions {
        headers,
        check_md5: options.check_md5.unwrap_or(false),
    }
}
