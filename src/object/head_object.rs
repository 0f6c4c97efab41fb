use crate::{
    common::ObjectMeta,
    error::head_error,
    request::{Oss, OssRequest},
    Error,
};
use hyper::{header, HeaderMap, Method};

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|header| header.to_str().ok())
        .map(|s| s.to_owned())
}

/// 获取文件的元信息
///
/// 文件不存在时，返回的错误状态码为404
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31984.html)
pub struct HeadObject {
    req: OssRequest,
}
impl HeadObject {
    pub(super) fn new(oss: Oss) -> Self {
        HeadObject {
            req: OssRequest::new(oss, Method::HEAD),
        }
    }
    /// 发送请求
    ///
    pub async fn send(self) -> Result<ObjectMeta, Error> {
        //构建http请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let headers = response.headers();
                Ok(ObjectMeta {
                    content_length: header_str(headers, header::CONTENT_LENGTH)
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0),
                    content_type: header_str(headers, header::CONTENT_TYPE),
                    last_modified: header_str(headers, header::LAST_MODIFIED),
                    e_tag: header_str(headers, header::ETAG)
                        .map(|v| v.trim_matches('"').to_owned()),
                })
            }
            _ => Err(head_error(&response)),
        }
    }
}
