use super::put_object::guess_mime;
use crate::{
    error::{normal_error, Error},
    request::{Oss, OssRequest},
};
use bytes::Bytes;
use hyper::{Body, Method};

/// 追加文件
///
/// 只允许对类型为Appendable的文件进行追加，通过put方法上传的文件不允许追加
///
/// 追加文件时，文件的最终大小不允许超过 5GB
///
/// 追加文件的逻辑和限制较为复杂，建议仔细阅读 [阿里云官方文档](https://help.aliyun.com/document_detail/31981.html)
pub struct AppendObject {
    req: OssRequest,
    mime: Option<String>,
}

impl AppendObject {
    pub(super) fn new(oss: Oss, position: u64) -> Self {
        let mut req = OssRequest::new(oss, Method::POST);
        req.insert_query("append", "");
        req.insert_query("position", position);
        AppendObject { req, mime: None }
    }
    /// 设置任意请求头
    pub fn set_header(mut self, key: impl ToString, value: impl ToString) -> Self {
        let key = key.to_string();
        if key.eq_ignore_ascii_case("content-type") {
            self.mime = Some(value.to_string());
        } else {
            self.req.insert_header(key, value);
        }
        self
    }
    /// 将内存中的数据追加到文件末尾
    ///
    /// 返回值为下一次追加时需要使用的position
    pub async fn send_content(mut self, content: impl Into<Bytes>) -> Result<u64, Error> {
        let content: Bytes = content.into();
        let content_type = match self.mime.take() {
            Some(mime) => mime,
            None => guess_mime(
                self.req.oss.object.as_deref().unwrap_or_default(),
                Some(&content[..]),
            ),
        };
        self.req.insert_header("Content-Type", content_type);
        self.req.insert_header("Content-Length", content.len());
        self.req.set_body(Body::from(content));
        //构建http请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => response
                .headers()
                .get("x-oss-next-append-position")
                .and_then(|header| header.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .ok_or(Error::OssInvalidResponse(None)),
            _ => Err(normal_error(response).await),
        }
    }
}
