use crate::{
    common::url_encode,
    error::{normal_error, Error},
    request::{Oss, OssRequest},
};
use hyper::Method;

/// 拷贝文件
///
/// 同Bucket内拷贝，文件大小不能超过 5GB
///
/// 其他较多的限制，具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31979.html)
pub struct CopyObject {
    req: OssRequest,
}

impl CopyObject {
    pub(super) fn new(oss: Oss, source: &str) -> Self {
        let copy_source = format!(
            "/{}/{}",
            oss.bucket.as_deref().unwrap_or_default(),
            url_encode(source)
        );
        let mut req = OssRequest::new(oss, Method::PUT);
        req.insert_header("x-oss-copy-source", copy_source);
        CopyObject { req }
    }
    /// 复制文件
    ///
    pub async fn send(self) -> Result<(), Error> {
        //构建http请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(()),
            _ => Err(normal_error(response).await),
        }
    }
}
