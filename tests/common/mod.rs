#![allow(dead_code)]

use aliyun_oss_fs::{
    common::{Acl, ByteStream, ObjectMeta, ObjectSummary},
    store::{ListObjectsRequest, ListPage, ObjectStore, PutOptions},
    Error, OssError,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::{stream, TryStreamExt};
use hyper::{Method, StatusCode};
use std::{
    collections::{BTreeMap, HashSet},
    sync::Mutex,
};

pub const LAST_MODIFIED: i64 = 1_700_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Put(String),
    Append(String, u64),
    Get(String),
    Delete(String),
    DeleteMany(Vec<String>),
    Copy(String, String),
    GetAcl(String),
    PutAcl(String, Acl),
    Head(String),
    List(ListObjectsRequest),
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content: Bytes,
    pub acl: Acl,
    pub headers: BTreeMap<String, String>,
}

enum Listed {
    Object(String),
    Prefix(String),
}

/// 内存中的存储实现，记录所有调用，可以让指定的操作失败
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
    fail_after: Mutex<BTreeMap<&'static str, usize>>,
    page_limit: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
    /// 每页最多返回的条目数，小于请求的max-keys时生效
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = Some(page_limit);
        self
    }
    pub fn with_objects<'a>(self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        for key in keys {
            self.insert(key, Bytes::from(key.to_owned()));
        }
        self
    }
    pub fn insert(&self, key: &str, content: impl Into<Bytes>) {
        self.objects.lock().unwrap().insert(
            key.to_owned(),
            StoredObject {
                content: content.into(),
                acl: Acl::Default,
                headers: BTreeMap::new(),
            },
        );
    }
    /// 让名为 `operation` 的操作返回错误
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }
    /// `operation` 成功 `successes` 次之后开始返回错误
    pub fn fail_after(&self, operation: &'static str, successes: usize) {
        self.fail_after.lock().unwrap().insert(operation, successes);
    }
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }
    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::List(_)))
            .count()
    }
    pub fn delete_many_calls(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteMany(keys) => Some(keys.len()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), Error> {
        self.calls.lock().unwrap().push(call);
        let mut failed = self.failing.lock().unwrap().contains(operation);
        if let Some(remaining) = self.fail_after.lock().unwrap().get_mut(operation) {
            if *remaining == 0 {
                failed = true;
            } else {
                *remaining -= 1;
            }
        }
        if failed {
            return Err(Error::OssError(
                StatusCode::INTERNAL_SERVER_ERROR,
                OssError::new("InternalError", format!("{} failed", operation)),
            ));
        }
        Ok(())
    }

    fn store(&self, key: &str, content: Bytes, options: &PutOptions) {
        let acl = options
            .headers
            .get("x-oss-object-acl")
            .and_then(|v| v.parse().ok())
            .unwrap_or(Acl::Default);
        self.objects.lock().unwrap().insert(
            key.to_owned(),
            StoredObject {
                content,
                acl,
                headers: options.headers.clone(),
            },
        );
    }
}

fn not_found(key: &str) -> Error {
    Error::OssError(
        StatusCode::NOT_FOUND,
        OssError::new("NoSuchKey", format!("{} does not exist", key)),
    )
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn object_exists(&self, key: &str) -> Result<bool, Error> {
        self.record("object_exists", Call::Exists(key.to_owned()))?;
        Ok(self.objects.lock().unwrap().contains_key(key))
    }
    async fn put_object(&self, key: &str, content: Bytes, options: &PutOptions) -> Result<(), Error> {
        self.record("put_object", Call::Put(key.to_owned()))?;
        self.store(key, content, options);
        Ok(())
    }
    async fn put_object_stream(
        &self,
        key: &str,
        stream: ByteStream,
        options: &PutOptions,
    ) -> Result<(), Error> {
        self.record("put_object", Call::Put(key.to_owned()))?;
        let chunks: Vec<Bytes> = stream.try_collect().await?;
        self.store(key, Bytes::from(chunks.concat()), options);
        Ok(())
    }
    async fn put_object_file(&self, key: &str, file: &str, options: &PutOptions) -> Result<(), Error> {
        self.record("put_object", Call::Put(key.to_owned()))?;
        let content = tokio::fs::read(file).await?;
        self.store(key, Bytes::from(content), options);
        Ok(())
    }
    async fn append_object(
        &self,
        key: &str,
        content: Bytes,
        position: u64,
        options: &PutOptions,
    ) -> Result<u64, Error> {
        self.record("append_object", Call::Append(key.to_owned(), position))?;
        let mut objects = self.objects.lock().unwrap();
        let current = objects.get(key).map(|v| v.content.clone()).unwrap_or_default();
        if current.len() as u64 != position {
            return Err(Error::OssError(
                StatusCode::CONFLICT,
                OssError::new("PositionNotEqualToLength", "position mismatch"),
            ));
        }
        let mut appended = current.to_vec();
        appended.extend_from_slice(&content);
        let next = appended.len() as u64;
        objects.insert(
            key.to_owned(),
            StoredObject {
                content: Bytes::from(appended),
                acl: Acl::Default,
                headers: options.headers.clone(),
            },
        );
        Ok(next)
    }
    async fn get_object(&self, key: &str) -> Result<Bytes, Error> {
        self.record("get_object", Call::Get(key.to_owned()))?;
        self.object(key).map(|v| v.content).ok_or_else(|| not_found(key))
    }
    async fn get_object_stream(&self, key: &str) -> Result<ByteStream, Error> {
        self.record("get_object", Call::Get(key.to_owned()))?;
        let content = self.object(key).map(|v| v.content).ok_or_else(|| not_found(key))?;
        let chunks = content
            .chunks(4)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect::<Vec<Result<Bytes, Error>>>();
        Ok(Box::pin(stream::iter(chunks)))
    }
    async fn delete_object(&self, key: &str) -> Result<(), Error> {
        self.record("delete_object", Call::Delete(key.to_owned()))?;
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
    async fn delete_objects(&self, keys: Vec<String>) -> Result<(), Error> {
        self.record("delete_objects", Call::DeleteMany(keys.clone()))?;
        let mut objects = self.objects.lock().unwrap();
        for key in keys {
            objects.remove(&key);
        }
        Ok(())
    }
    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), Error> {
        self.record(
            "copy_object",
            Call::Copy(source.to_owned(), destination.to_owned()),
        )?;
        let mut objects = self.objects.lock().unwrap();
        let object = objects.get(source).cloned().ok_or_else(|| not_found(source))?;
        objects.insert(destination.to_owned(), object);
        Ok(())
    }
    async fn get_object_acl(&self, key: &str) -> Result<Acl, Error> {
        self.record("get_object_acl", Call::GetAcl(key.to_owned()))?;
        self.object(key).map(|v| v.acl).ok_or_else(|| not_found(key))
    }
    async fn put_object_acl(&self, key: &str, acl: Acl) -> Result<(), Error> {
        self.record("put_object_acl", Call::PutAcl(key.to_owned(), acl))?;
        let mut objects = self.objects.lock().unwrap();
        let object = objects.get_mut(key).ok_or_else(|| not_found(key))?;
        object.acl = acl;
        Ok(())
    }
    async fn head_object(&self, key: &str) -> Result<ObjectMeta, Error> {
        self.record("head_object", Call::Head(key.to_owned()))?;
        let object = self.object(key).ok_or_else(|| not_found(key))?;
        Ok(ObjectMeta {
            content_length: object.content.len() as u64,
            content_type: object.headers.get("content-type").cloned(),
            last_modified: Some("Tue, 14 Nov 2023 22:13:20 GMT".to_owned()),
            e_tag: None,
        })
    }
    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListPage, Error> {
        self.record("list_objects", Call::List(request.clone()))?;
        let objects = self.objects.lock().unwrap();
        let start = request
            .continuation_token
            .as_deref()
            .or(request.start_after.as_deref())
            .unwrap_or_default();
        //续传位置是一个分组时，跳过整个分组
        let skipped_group = request
            .continuation_token
            .as_deref()
            .filter(|token| request.delimiter.is_some() && token.ends_with('/'));
        let mut listed: Vec<Listed> = Vec::new();
        for key in objects.keys() {
            if !key.starts_with(&request.prefix) || key.as_str() <= start {
                continue;
            }
            if skipped_group.map_or(false, |group| key.starts_with(group)) {
                continue;
            }
            let rest = &key[request.prefix.len()..];
            let group = request
                .delimiter
                .as_deref()
                .and_then(|delimiter| rest.find(delimiter).map(|i| i + delimiter.len()))
                .map(|end| format!("{}{}", request.prefix, &rest[..end]));
            match group {
                Some(group) => {
                    if !matches!(listed.last(), Some(Listed::Prefix(last)) if *last == group) {
                        listed.push(Listed::Prefix(group));
                    }
                }
                None => listed.push(Listed::Object(key.clone())),
            }
        }
        let mut limit = request.max_keys.max(1) as usize;
        if let Some(page_limit) = self.page_limit {
            limit = limit.min(page_limit);
        }
        let is_truncated = listed.len() > limit;
        listed.truncate(limit);
        let next_continuation_token = if is_truncated {
            listed.last().map(|item| match item {
                Listed::Object(key) | Listed::Prefix(key) => key.clone(),
            })
        } else {
            None
        };
        let mut page = ListPage {
            is_truncated,
            next_continuation_token,
            ..Default::default()
        };
        for item in listed {
            match item {
                Listed::Object(key) => {
                    let size = objects.get(&key).map_or(0, |v| v.content.len() as u64);
                    page.objects.push(ObjectSummary {
                        key,
                        size,
                        last_modified: "2023-11-14T22:13:20.000Z".to_owned(),
                    });
                }
                Listed::Prefix(prefix) => page.common_prefixes.push(prefix),
            }
        }
        Ok(page)
    }
    fn sign_url(
        &self,
        key: &str,
        expires: DateTime<Utc>,
        method: Method,
        _headers: &BTreeMap<String, String>,
    ) -> Result<String, Error> {
        Ok(format!(
            "https://bucket.oss-cn-hangzhou.aliyuncs.com/{}?Expires={}&Method={}",
            key,
            expires.timestamp(),
            method
        ))
    }
}
