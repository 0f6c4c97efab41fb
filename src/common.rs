//! 公共数据定义
//!
//!
use crate::Error;
use bytes::Bytes;
use futures_util::Stream;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_derive::{Deserialize, Serialize};
use std::{fmt, pin::Pin, str::FromStr};

/// 文件内容数据流，上传和下载时使用
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

// -------------------------- 公共方法 --------------------------
//编码查询参数值和文件路径
const URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');
pub(crate) fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, URL_ENCODE).to_string()
}

//转义xml中的特殊字符
pub(crate) fn xml_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// -------------------------- 公共数据 --------------------------

/// 访问权限ACL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acl {
    /// 仅用于文件ACL，代表文件ACL继承存储空间ACL
    Default,
    /// 私有，读写请求全部需要经过授权
    Private,
    /// 公共读，存储空间中的文件可以被匿名读取，但无法写入文件
    PublicRead,
    /// 公共读写，存储空间中的文件可以被匿名读取和写入
    PublicReadWrite,
}
impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Acl::Default => "default",
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
            Acl::PublicReadWrite => "public-read-write",
        };
        f.write_str(value)
    }
}
impl FromStr for Acl {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(Acl::Default),
            "private" => Ok(Acl::Private),
            "public-read" => Ok(Acl::PublicRead),
            "public-read-write" => Ok(Acl::PublicReadWrite),
            other => Err(format!("未知的ACL：{}", other)),
        }
    }
}

///存储类型
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
pub enum StorageClass {
    /// 标准存储
    Standard,
    /// 低频访问
    IA,
    /// 归档存储
    Archive,
    /// 冷归档存储
    ColdArchive,
    /// 深度冷归档存储
    DeepColdArchive,
}
impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageClass::Standard => f.write_str("Standard"),
            StorageClass::IA => f.write_str("IA"),
            StorageClass::Archive => f.write_str("Archive"),
            StorageClass::ColdArchive => f.write_str("ColdArchive"),
            StorageClass::DeepColdArchive => f.write_str("DeepColdArchive"),
        }
    }
}

/// 文件列表中的单个文件
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ObjectSummary {
    /// 文件完整路径
    #[serde(rename = "Key")]
    pub key: String,
    /// 文件大小，单位字节
    #[serde(rename = "Size", default)]
    pub size: u64,
    /// 最后修改时间，ISO8601格式
    #[serde(rename = "LastModified", default)]
    pub last_modified: String,
}

/// 分组（目录）信息
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommonPrefix {
    #[serde(rename = "Prefix")]
    pub prefix: String,
}

/// 列举文件返回的结果
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ObjectsList {
    /// 是否还有未返回的结果
    #[serde(rename = "IsTruncated", default)]
    pub is_truncated: bool,
    /// 下一次列举需要使用的token
    #[serde(rename = "NextContinuationToken", default)]
    pub next_continuation_token: Option<String>,
    /// 文件列表
    #[serde(rename = "Contents", default)]
    pub contents: Vec<ObjectSummary>,
    /// 分组列表
    #[serde(rename = "CommonPrefixes", default)]
    pub common_prefixes: Vec<CommonPrefix>,
}

/// 文件元信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    /// 文件大小
    pub content_length: u64,
    /// 文件类型
    pub content_type: Option<String>,
    /// 最后修改时间，RFC 1123格式
    pub last_modified: Option<String>,
    /// 文件的ETag
    pub e_tag: Option<String>,
}
