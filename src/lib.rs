//!
//! 阿里云对象存储服务（Object Storage Service，简称OSS）的文件系统适配器。
//!
//! 把存在、读写、复制、移动、删除、列举目录、可见性、元信息和url生成等统一的文件系统操作映射为OSS的API调用。
//!
//! 底层通过 OssClient - OssBucket - OssObject 三层结构访问OSS，适配器只依赖 [`ObjectStore`](store::ObjectStore) 接口，
//! 默认实现为 [`OssBucket`]。
//!
//! ##### 初始化
//! ```rust,ignore
//! use aliyun_oss_fs::{AdapterConfig, AliyunOssAdapter};
//!
//! let config = AdapterConfig::from_file("oss.toml")?;
//! let adapter = AliyunOssAdapter::from_config(&config)?;
//! ```
//!
//! ##### 上传文件
//! ```rust,ignore
//! use aliyun_oss_fs::{Config, Visibility};
//!
//! adapter.write("file.md", "contents", &Config::new()).await?;
//! adapter
//!     .upload_file("rust.png", "Your File Path", &Config::new().set_visibility(Visibility::Public))
//!     .await?;
//! ```
//!
//! ##### 列举目录
//! ```rust,ignore
//! use futures_util::TryStreamExt;
//!
//! let entries: Vec<_> = adapter.list_contents("/", true).try_collect().await?;
//! ```
//!
//! ##### 删除目录
//! ```rust,ignore
//! adapter.delete_directory("uploads/2023").await?;
//! ```
//!
//! ##### 获取文件访问地址
//! ```rust,ignore
//! use chrono::{Duration, Utc};
//!
//! let url = adapter.temporary_url("file.md", Utc::now() + Duration::days(3), &Config::new())?;
//! ```
//!
//! ##### 直接使用OSS接口
//! ```rust,ignore
//! let client = OssClient::new("Your AccessKey ID", "Your AccessKey Secret");
//! let bucket = client.bucket("for-rs-test", "oss-cn-zhangjiakou.aliyuncs.com");
//! let objects = bucket.list_objects().set_prefix("rust").send().await?;
//! ```

#[doc(inline)]
pub use crate::adapter::{
    AliyunOssAdapter, Config, DirectoryEntry, Entry, FileEntry, FsError, OssOptions, PathPrefixer,
    UrlGenerator, Visibility,
};
#[doc(inline)]
pub use crate::bucket::OssBucket;
#[doc(inline)]
pub use crate::client::OssClient;
#[doc(inline)]
pub use crate::config::{AdapterConfig, ConfigError};
#[doc(inline)]
pub use crate::error::{Error, OssError};
#[doc(inline)]
pub use crate::object::OssObject;

pub mod adapter;
pub mod bucket;
pub mod client;
pub mod common;
pub mod config;
mod error;
pub mod object;
mod request;
pub mod store;
