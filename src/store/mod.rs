//! 适配器依赖的存储接口
//!
//! [`ObjectStore`] 只包含文件系统适配需要的少量操作，默认实现为 [`OssBucket`](crate::OssBucket)，
//! 测试时可以替换为内存实现。

use crate::{
    common::{Acl, ByteStream, ObjectMeta, ObjectSummary},
    Error,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hyper::Method;
use std::collections::BTreeMap;

mod oss;

/// 列举请求参数，对应ListObjectsV2
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsRequest {
    pub prefix: String,
    pub delimiter: Option<String>,
    pub max_keys: u32,
    pub continuation_token: Option<String>,
    pub start_after: Option<String>,
}

impl ListObjectsRequest {
    pub fn new(prefix: impl ToString, max_keys: u32) -> Self {
        ListObjectsRequest {
            prefix: prefix.to_string(),
            max_keys,
            ..Default::default()
        }
    }
    pub fn delimiter(mut self, delimiter: impl ToString) -> Self {
        self.delimiter = Some(delimiter.to_string());
        self
    }
    pub fn continuation_token(mut self, token: Option<String>) -> Self {
        self.continuation_token = token;
        self
    }
    pub fn start_after(mut self, start_after: impl ToString) -> Self {
        self.start_after = Some(start_after.to_string());
        self
    }
}

/// 单页列举结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// 文件，按存储服务返回的顺序排列
    pub objects: Vec<ObjectSummary>,
    /// 子目录前缀，以 `/` 结尾
    pub common_prefixes: Vec<String>,
    pub is_truncated: bool,
    pub next_continuation_token: Option<String>,
}

/// 上传时附加的请求头
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// 请求头，`content-type` 会覆盖自动推断的文件类型
    pub headers: BTreeMap<String, String>,
    /// 上传时携带Content-MD5
    pub check_md5: bool,
}

/// 存储服务的最小操作集合
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 文件是否存在，不存在时返回 `Ok(false)`
    async fn object_exists(&self, key: &str) -> Result<bool, Error>;
    async fn put_object(&self, key: &str, content: Bytes, options: &PutOptions) -> Result<(), Error>;
    async fn put_object_stream(
        &self,
        key: &str,
        stream: ByteStream,
        options: &PutOptions,
    ) -> Result<(), Error>;
    /// 上传本地文件
    async fn put_object_file(&self, key: &str, file: &str, options: &PutOptions) -> Result<(), Error>;
    /// 追加内容，返回下一次追加的位置
    async fn append_object(
        &self,
        key: &str,
        content: Bytes,
        position: u64,
        options: &PutOptions,
    ) -> Result<u64, Error>;
    async fn get_object(&self, key: &str) -> Result<Bytes, Error>;
    async fn get_object_stream(&self, key: &str) -> Result<ByteStream, Error>;
    async fn delete_object(&self, key: &str) -> Result<(), Error>;
    /// 批量删除，调用方保证单次不超过 [`MAX_DELETE_OBJECTS`](crate::bucket::MAX_DELETE_OBJECTS) 个
    async fn delete_objects(&self, keys: Vec<String>) -> Result<(), Error>;
    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), Error>;
    async fn get_object_acl(&self, key: &str) -> Result<Acl, Error>;
    async fn put_object_acl(&self, key: &str, acl: Acl) -> Result<(), Error>;
    async fn head_object(&self, key: &str) -> Result<ObjectMeta, Error>;
    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListPage, Error>;
    /// 生成签名url，只在本地计算
    fn sign_url(
        &self,
        key: &str,
        expires: DateTime<Utc>,
        method: Method,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, Error>;
}
