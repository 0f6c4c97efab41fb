use crate::{
    common::ByteStream,
    error::{normal_error, Error},
    request::{Oss, OssRequest},
};
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use hyper::{Body, Method};
use md5::{Digest, Md5};
use tokio::{fs::File, io::BufReader};
use tokio_util::io::ReaderStream;

// 单次上传的文件大小上限
const MAX_PUT_SIZE: u64 = 5_000_000_000;

// 推断文件类型：优先使用文件扩展名，其次分析文件内容
pub(crate) fn guess_mime(object: &str, content: Option<&[u8]>) -> String {
    mime_guess::from_path(object)
        .first()
        .map(|v| v.to_string())
        .or_else(|| {
            content
                .and_then(infer::get)
                .map(|v| v.mime_type().to_owned())
        })
        .unwrap_or_else(|| "application/octet-stream".to_owned())
}

/// 上传文件
///
/// 添加的Object大小不能超过 5GB
///
/// 默认情况下，如果已存在同名Object且对该Object有访问权限，则新添加的Object将覆盖原有的Object
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31978.html)
pub struct PutObject {
    req: OssRequest,
    mime: Option<String>,
    enable_md5: bool,
}

impl PutObject {
    pub(super) fn new(oss: Oss) -> Self {
        PutObject {
            req: OssRequest::new(oss, Method::PUT),
            mime: None,
            enable_md5: false,
        }
    }
    /// 设置任意请求头，Content-Type会覆盖自动推断的文件类型
    pub fn set_header(mut self, key: impl ToString, value: impl ToString) -> Self {
        let key = key.to_string();
        if key.eq_ignore_ascii_case("content-type") {
            self.mime = Some(value.to_string());
        } else {
            self.req.insert_header(key, value);
        }
        self
    }
    /// 上传时计算Content-MD5，由OSS校验内容完整性，仅对send_content()有效
    pub fn enable_md5(mut self, enable_md5: bool) -> Self {
        self.enable_md5 = enable_md5;
        self
    }
    /// 将内存中的数据上传到OSS
    ///
    /// 返回值为OSS返回的ETag标识
    pub async fn send_content(mut self, content: impl Into<Bytes>) -> Result<Option<String>, Error> {
        let content: Bytes = content.into();
        //读取文件大小
        let content_size = content.len() as u64;
        if content_size >= MAX_PUT_SIZE {
            return Err(Error::FileTooBig);
        }
        //生成文件类型
        let content_type = match self.mime.take() {
            Some(mime) => mime,
            None => guess_mime(
                self.req.oss.object.as_deref().unwrap_or_default(),
                Some(&content[..]),
            ),
        };
        self.req.insert_header("Content-Type", content_type);
        self.req.insert_header("Content-Length", content_size);
        if self.enable_md5 {
            let mut hasher = Md5::new();
            hasher.update(&content);
            self.req
                .insert_header("Content-MD5", general_purpose::STANDARD.encode(hasher.finalize()));
        }
        self.req.set_body(Body::from(content));
        self.send().await
    }
    /// 将数据流上传到OSS
    ///
    /// 未设置mime类型时，只能根据文件扩展名推断文件类型
    pub async fn send_stream(mut self, stream: ByteStream) -> Result<Option<String>, Error> {
        let content_type = match self.mime.take() {
            Some(mime) => mime,
            None => guess_mime(self.req.oss.object.as_deref().unwrap_or_default(), None),
        };
        self.req.insert_header("Content-Type", content_type);
        self.req.set_body(Body::wrap_stream(stream));
        self.send().await
    }
    /// 将磁盘中的文件上传到OSS
    ///
    /// 不支持网络路径，如果需要上传smb\nfs等网络存储中的文件，请先挂载到本地，再使用本地路径地址
    pub async fn send_file(mut self, file: &str) -> Result<Option<String>, Error> {
        //判断路径
        if file.contains("://") {
            return Err(Error::PathNotSupported);
        }
        //生成文件类型
        let content_type = match self.mime.take() {
            Some(mime) => mime,
            None => match infer::get_from_path(file)? {
                Some(kind) => kind.mime_type().to_owned(),
                None => guess_mime(file, None),
            },
        };
        //打开文件
        let file = File::open(file).await?;
        //读取文件大小
        let file_size = file.metadata().await?.len();
        if file_size >= MAX_PUT_SIZE {
            return Err(Error::FileTooBig);
        }
        self.req.insert_header("Content-Type", content_type);
        self.req.insert_header("Content-Length", file_size);
        //初始化文件内容读取数据流
        let buf = BufReader::with_capacity(131072, file);
        let stream = ReaderStream::with_capacity(buf, 16384);
        self.req.set_body(Body::wrap_stream(stream));
        self.send().await
    }
    async fn send(self) -> Result<Option<String>, Error> {
        //上传文件
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let e_tag = response
                    .headers()
                    .get("ETag")
                    .and_then(|header| header.to_str().ok())
                    .map(|v| v.trim_matches('"').to_owned());
                Ok(e_tag)
            }
            _ => Err(normal_error(response).await),
        }
    }
}
