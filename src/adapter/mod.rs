//! 文件系统适配器
//!
//! 把存在、读写、复制、移动、删除、列举、可见性、元信息和url生成等统一的文件系统操作映射为OSS的API调用，
//! 所有路径在调用前都会加上配置的前缀，返回的路径会去掉前缀。
//!
//! ```rust,ignore
//! use aliyun_oss_fs::{AdapterConfig, AliyunOssAdapter, Config, Visibility};
//! use futures_util::TryStreamExt;
//!
//! let config = AdapterConfig::from_file("oss.toml")?;
//! let adapter = AliyunOssAdapter::from_config(&config)?;
//! adapter
//!     .write("docs/file.md", "contents", &Config::new().set_visibility(Visibility::Private))
//!     .await?;
//! let entries: Vec<_> = adapter.list_contents("docs", true).try_collect().await?;
//! ```

pub use self::{
    entry::{DirectoryEntry, Entry, FileEntry},
    error::FsError,
    options::{Config, OssOptions, Visibility},
    prefixer::PathPrefixer,
    url::UrlGenerator,
};

mod deleter;
mod entry;
mod error;
mod lister;
mod options;
mod prefixer;
mod url;

use self::{
    entry::parse_header_time,
    lister::{page_entries, walk},
    options::merge_config,
};
use crate::{
    common::ByteStream,
    config::{AdapterConfig, ConfigError},
    store::{ListObjectsRequest, ObjectStore},
    Error, OssBucket, OssClient,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::{stream::BoxStream, StreamExt, TryStreamExt};
use hyper::Method;
use std::time::Duration;
use tracing::{debug, warn};

fn failed(error: FsError) -> FsError {
    match error.source_error() {
        Some(source) => warn!(%error, %source, "oss operation failed"),
        None => warn!(%error, "oss operation failed"),
    }
    error
}

/// 阿里云OSS文件系统适配器
///
/// 默认使用 [`OssBucket`] 访问OSS，也可以传入任意 [`ObjectStore`] 实现
#[derive(Debug, Clone)]
pub struct AliyunOssAdapter<S = OssBucket> {
    store: S,
    prefixer: PathPrefixer,
    options: OssOptions,
    urls: Option<UrlGenerator>,
}

impl AliyunOssAdapter<OssBucket> {
    /// 根据配置初始化OssClient和OssBucket
    pub fn from_config(config: &AdapterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut client = OssClient::new(&config.access_key_id, &config.access_key_secret);
        if !config.use_ssl {
            client = client.disable_https();
        }
        if let Some(security_token) = &config.security_token {
            client = client.set_security_token(security_token);
        }
        if let Some(timeout) = config.timeout() {
            client = client.set_timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout() {
            client = client.set_connect_timeout(connect_timeout);
        }
        let mut bucket = client.bucket(&config.bucket, config.request_endpoint());
        if config.is_cname {
            bucket = bucket.set_custom_domain(&config.endpoint, config.use_ssl);
        }
        let mut urls = UrlGenerator::new(&config.bucket, &config.endpoint)
            .set_https(config.use_ssl)
            .set_cname(config.is_cname);
        if let Some(domain) = &config.domain {
            urls = urls.set_domain(domain);
        }
        if let Some(internal) = &config.internal {
            urls = urls.set_internal(internal);
        }
        Ok(AliyunOssAdapter::new(bucket, &config.prefix)
            .set_options(config.options.clone())
            .set_url_generator(urls))
    }
}

impl<S: ObjectStore> AliyunOssAdapter<S> {
    pub fn new(store: S, prefix: &str) -> Self {
        AliyunOssAdapter {
            store,
            prefixer: PathPrefixer::new(prefix),
            options: OssOptions::default(),
            urls: None,
        }
    }
    /// 设置默认的请求选项
    pub fn set_options(mut self, options: OssOptions) -> Self {
        self.options = options;
        self
    }
    /// 设置生成访问地址使用的域名信息
    pub fn set_url_generator(mut self, urls: UrlGenerator) -> Self {
        self.urls = Some(urls);
        self
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn prefixer(&self) -> &PathPrefixer {
        &self.prefixer
    }
    pub fn options(&self) -> &OssOptions {
        &self.options
    }
    // 空的Key指向存储空间本身，不能用于文件操作
    fn object_key(&self, path: &str) -> Result<String, Error> {
        let key = self.prefixer.prefix_path(path);
        if key.is_empty() {
            return Err(Error::InvalidObjectKey);
        }
        Ok(key)
    }

    /// 文件是否存在
    pub async fn file_exists(&self, path: &str) -> Result<bool, FsError> {
        async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "file exists");
            self.store.object_exists(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::CheckExistenceFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 目录是否存在，目录下有任意文件或者存在目录Key都视为存在
    pub async fn directory_exists(&self, path: &str) -> Result<bool, FsError> {
        let key = self.prefixer.prefix_directory_path(path);
        debug!(path, key = %key, "directory exists");
        let request = ListObjectsRequest::new(&key, 1).delimiter("/");
        let page = self.store.list_objects(&request).await.map_err(|source| {
            failed(FsError::CheckExistenceFailed {
                path: path.to_owned(),
                source,
            })
        })?;
        Ok(!page.objects.is_empty() || !page.common_prefixes.is_empty())
    }
    /// 写入文件，已存在时覆盖
    pub async fn write(
        &self,
        path: &str,
        content: impl Into<Bytes>,
        config: &Config,
    ) -> Result<(), FsError> {
        async move {
            let key = self.object_key(path)?;
            let options = merge_config(&self.options, config);
            debug!(path, key = %key, "write");
            self.store.put_object(&key, content.into(), &options).await
        }
        .await
        .map_err(|source| {
            failed(FsError::WriteFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 以数据流的方式写入文件
    pub async fn write_stream(
        &self,
        path: &str,
        stream: ByteStream,
        config: &Config,
    ) -> Result<(), FsError> {
        async move {
            let key = self.object_key(path)?;
            let options = merge_config(&self.options, config);
            debug!(path, key = %key, "write stream");
            self.store.put_object_stream(&key, stream, &options).await
        }
        .await
        .map_err(|source| {
            failed(FsError::WriteFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 上传本地文件
    pub async fn upload_file(&self, path: &str, file: &str, config: &Config) -> Result<(), FsError> {
        async move {
            let key = self.object_key(path)?;
            let options = merge_config(&self.options, config);
            debug!(path, key = %key, file, "upload file");
            self.store.put_object_file(&key, file, &options).await
        }
        .await
        .map_err(|source| {
            failed(FsError::WriteFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 追加内容到文件末尾，返回下一次追加的位置
    pub async fn append(
        &self,
        path: &str,
        content: impl Into<Bytes>,
        position: u64,
        config: &Config,
    ) -> Result<u64, FsError> {
        async move {
            let key = self.object_key(path)?;
            let options = merge_config(&self.options, config);
            debug!(path, key = %key, position, "append");
            self.store.append_object(&key, content.into(), position, &options).await
        }
        .await
        .map_err(|source| {
            failed(FsError::WriteFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 读取文件全部内容
    pub async fn read(&self, path: &str) -> Result<Bytes, FsError> {
        async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "read");
            self.store.get_object(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::ReadFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 以数据流的方式读取文件
    ///
    /// 数据流中途出错时，错误会作为流中的最后一项返回
    pub async fn read_stream(&self, path: &str) -> Result<ByteStream, FsError> {
        async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "read stream");
            self.store.get_object_stream(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::ReadFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 删除文件，文件不存在时也返回成功
    pub async fn delete(&self, path: &str) -> Result<(), FsError> {
        async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "delete");
            self.store.delete_object(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::DeleteFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 删除目录及其下的全部内容
    ///
    /// 删除分批进行，中途失败时已经删除的文件不会恢复
    pub async fn delete_directory(&self, path: &str) -> Result<(), FsError> {
        debug!(path, "delete directory");
        deleter::delete_directory(&self.store, &self.prefixer, path)
            .await
            .map_err(|source| {
                failed(FsError::DeleteDirectoryFailed {
                    path: path.to_owned(),
                    source,
                })
            })
    }
    /// 创建目录，即上传一个以 `/` 结尾的空文件
    pub async fn create_directory(&self, path: &str, config: &Config) -> Result<(), FsError> {
        let key = self.prefixer.prefix_directory_path(path);
        //存储空间根目录总是存在
        if key.is_empty() {
            return Ok(());
        }
        let options = merge_config(&self.options, config);
        debug!(path, key = %key, "create directory");
        self.store
            .put_object(&key, Bytes::new(), &options)
            .await
            .map_err(|source| {
                failed(FsError::CreateDirectoryFailed {
                    path: path.to_owned(),
                    source,
                })
            })
    }
    /// 复制文件
    pub async fn copy(&self, source_path: &str, destination: &str) -> Result<(), FsError> {
        async {
            let source_key = self.object_key(source_path)?;
            let destination_key = self.object_key(destination)?;
            debug!(source = %source_key, destination = %destination_key, "copy");
            self.store.copy_object(&source_key, &destination_key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::CopyFailed {
                source_path: source_path.to_owned(),
                destination: destination.to_owned(),
                source,
            })
        })
    }
    /// 移动文件，先复制再删除，复制失败时不会删除源文件
    ///
    /// 源路径和目标路径指向同一个文件时不做任何操作
    pub async fn move_file(&self, source_path: &str, destination: &str) -> Result<(), FsError> {
        if let (Ok(source_key), Ok(destination_key)) =
            (self.object_key(source_path), self.object_key(destination))
        {
            if source_key == destination_key {
                debug!(key = %source_key, "move onto itself");
                return Ok(());
            }
        }
        self.copy(source_path, destination).await?;
        self.delete(source_path).await
    }
    /// 设置文件的可见性
    pub async fn set_visibility(&self, path: &str, visibility: Visibility) -> Result<(), FsError> {
        async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, %visibility, "set visibility");
            self.store.put_object_acl(&key, visibility.to_acl()).await
        }
        .await
        .map_err(|source| {
            failed(FsError::SetVisibilityFailed {
                path: path.to_owned(),
                source,
            })
        })
    }
    /// 获取文件的可见性
    pub async fn visibility(&self, path: &str) -> Result<Visibility, FsError> {
        let acl = async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "visibility");
            self.store.get_object_acl(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::RetrieveMetadataFailed {
                path: path.to_owned(),
                source,
            })
        })?;
        Ok(Visibility::from_acl(acl))
    }
    /// 获取文件的大小、最后修改时间和文件类型
    pub async fn metadata(&self, path: &str) -> Result<FileEntry, FsError> {
        let meta = async {
            let key = self.object_key(path)?;
            debug!(path, key = %key, "metadata");
            self.store.head_object(&key).await
        }
        .await
        .map_err(|source| {
            failed(FsError::RetrieveMetadataFailed {
                path: path.to_owned(),
                source,
            })
        })?;
        Ok(FileEntry {
            path: path.to_owned(),
            size: meta.content_length,
            last_modified: meta.last_modified.as_deref().and_then(parse_header_time),
            mime_type: meta.content_type,
        })
    }
    pub async fn file_size(&self, path: &str) -> Result<u64, FsError> {
        Ok(self.metadata(path).await?.size)
    }
    pub async fn mime_type(&self, path: &str) -> Result<Option<String>, FsError> {
        Ok(self.metadata(path).await?.mime_type)
    }
    pub async fn last_modified(&self, path: &str) -> Result<Option<i64>, FsError> {
        Ok(self.metadata(path).await?.last_modified)
    }
    /// 列举目录内容
    ///
    /// 按需分页请求，停止消费即停止请求。`deep` 为true时，每个目录之后紧跟它的全部内容。
    /// 某一页失败时返回 [`FsError::ListingFailed`] 并结束列举。
    pub fn list_contents(&self, path: &str, deep: bool) -> BoxStream<'_, Result<Entry, FsError>> {
        debug!(path, deep, "list contents");
        let root = path.to_owned();
        walk(&self.store, &self.prefixer, path, deep)
            .map_ok(|listed| listed.entry)
            .map_err(move |source| {
                failed(FsError::ListingFailed {
                    path: root.clone(),
                    source,
                })
            })
            .boxed()
    }
    /// 分页列举目录的直接子项，按Key排序
    ///
    /// 获取下一页时把上一页最后一项的路径作为 `start_path` 传入
    pub async fn page_objects(
        &self,
        root: &str,
        page_size: u32,
        start_path: Option<&str>,
    ) -> Result<Vec<Entry>, FsError> {
        let prefix = self.prefixer.prefix_directory_path(root);
        //多请求一条，留给目录本身或者上一页最后的目录
        let mut request = ListObjectsRequest::new(&prefix, page_size.saturating_add(1)).delimiter("/");
        let start_path = start_path.filter(|v| !v.is_empty());
        if let Some(start_path) = start_path {
            request = request.start_after(self.prefixer.prefix_path(start_path));
        }
        debug!(root, prefix = %prefix, page_size, start_path, "page objects");
        let page = self.store.list_objects(&request).await.map_err(|source| {
            failed(FsError::ListingFailed {
                path: root.to_owned(),
                source,
            })
        })?;
        let mut listed = page_entries(&self.prefixer, &prefix, page);
        listed.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(listed
            .into_iter()
            .map(|listed| listed.entry)
            .filter(|entry| Some(entry.path()) != start_path)
            .take(page_size as usize)
            .collect())
    }
    /// 文件的公开访问地址，未设置域名信息时返回None
    pub fn public_url(&self, path: &str) -> Option<String> {
        self.urls
            .as_ref()
            .map(|urls| urls.full_url(&self.prefixer.prefix_path(path)))
    }
    /// 生成带签名的url，有效期为 `ttl`
    pub fn sign_url(
        &self,
        path: &str,
        ttl: Duration,
        method: Method,
        config: &Config,
    ) -> Result<String, FsError> {
        if ttl.is_zero() {
            return Err(FsError::InvalidTtl);
        }
        let expires = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or(FsError::InvalidTtl)?;
        self.signed_url(path, expires, method, config)
    }
    /// 生成在 `expiration` 之前有效的下载地址，域名会替换为对外访问的域名
    pub fn temporary_url(
        &self,
        path: &str,
        expiration: DateTime<Utc>,
        config: &Config,
    ) -> Result<String, FsError> {
        let url = self.signed_url(path, expiration, Method::GET, config)?;
        Ok(match &self.urls {
            Some(urls) => urls.correct_domain(&url),
            None => url,
        })
    }
    fn signed_url(
        &self,
        path: &str,
        expires: DateTime<Utc>,
        method: Method,
        config: &Config,
    ) -> Result<String, FsError> {
        self.object_key(path)
            .and_then(|key| {
                let options = merge_config(&self.options, config);
                debug!(path, key = %key, %method, "sign url");
                self.store.sign_url(&key, expires, method, &options.headers)
            })
            .map_err(|source| {
                failed(FsError::SignUrlFailed {
                    path: path.to_owned(),
                    source,
                })
            })
    }
}
