use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use hyper::{body::to_bytes, Body, Response, StatusCode};
use serde_derive::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    HyperError(#[from] hyper::Error),
    #[error("{0}")]
    HttpError(#[from] hyper::http::Error),
    #[error("不支持网络路径")]
    PathNotSupported,
    #[error("文件大小超过5GB，请使用MultipartUpload接口")]
    FileTooBig,
    #[error("对象名称不能为空")]
    InvalidObjectKey,
    #[error("请求超时")]
    Timeout,
    #[error("OSS返回了成功，但消息体解析失败，请自行解析")]
    OssInvalidResponse(Option<Bytes>),
    #[error("OSS返回了错误，HTTP状态码：{0}，错误内容：{1}")]
    OssError(StatusCode, OssError),
    #[error("OSS返回了错误，HTTP状态码：{0}，错误内容无法解析：{1:?}")]
    OssInvalidError(StatusCode, Bytes),
}

impl Error {
    /// OSS返回的HTTP状态码，非OSS错误时为None
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::OssError(status, _) | Error::OssInvalidError(status, _) => Some(*status),
            _ => None,
        }
    }
    /// OSS返回的错误代码，比如 NoSuchKey
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::OssError(_, oss_error) => Some(&oss_error.code),
            _ => None,
        }
    }
    /// 文件或存储空间不存在
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// OSS返回的错误信息
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct OssError {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "HostId", default)]
    pub host_id: String,
}

impl OssError {
    pub fn new(code: impl ToString, message: impl ToString) -> Self {
        OssError {
            code: code.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }
}

impl fmt::Display for OssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.trim(), self.message.trim())?;
        if !self.request_id.is_empty() {
            write!(f, " (RequestId: {})", self.request_id.trim())?;
        }
        Ok(())
    }
}

pub(crate) fn parse_error(status_code: StatusCode, response_bytes: Bytes) -> Error {
    match serde_xml_rs::from_reader::<&[u8], OssError>(&response_bytes) {
        Ok(oss_error) => Error::OssError(status_code, oss_error),
        Err(_) => Error::OssInvalidError(status_code, response_bytes),
    }
}

pub(crate) async fn normal_error(response: Response<Body>) -> Error {
    let status_code = response.status();
    match to_bytes(response.into_body()).await {
        Err(_) => Error::OssInvalidError(status_code, Bytes::new()),
        Ok(response_bytes) => parse_error(status_code, response_bytes),
    }
}

// HEAD请求没有消息体，错误内容经过base64编码放在x-oss-err头里
pub(crate) fn head_error(response: &Response<Body>) -> Error {
    let status_code = response.status();
    let x_oss_error = response
        .headers()
        .get("x-oss-err")
        .and_then(|header| general_purpose::STANDARD.decode(header).ok())
        .map(Bytes::from);
    match x_oss_error {
        None => Error::OssInvalidError(status_code, Bytes::new()),
        Some(response_bytes) => parse_error(status_code, response_bytes),
    }
}
