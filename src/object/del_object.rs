use crate::{
    error::normal_error,
    request::{Oss, OssRequest},
    Error,
};
use hyper::Method;

/// 删除指定文件
///
/// 删除文件时，不会检查文件是否存在，只要请求合法，都会返回成功
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31982.html)
pub struct DelObject {
    req: OssRequest,
}
impl DelObject {
    pub(super) fn new(oss: Oss) -> Self {
        DelObject {
            req: OssRequest::new(oss, Method::DELETE),
        }
    }
    /// 发送请求
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
