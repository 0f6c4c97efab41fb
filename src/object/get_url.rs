use crate::request::{Oss, OssRequest};
use chrono::{DateTime, Utc};
use hyper::Method;

/// 获取文件的url
///
/// 私有文件可以通过此方法获取一个授权url，即可直接下载此文件；指定PUT方法时，可用于直接上传文件
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31952.html)
pub struct GetUrl {
    req: OssRequest,
    expires: DateTime<Utc>,
}
impl GetUrl {
    pub(super) fn new(oss: Oss, expires: DateTime<Utc>) -> Self {
        GetUrl {
            req: OssRequest::new(oss, Method::GET),
            expires,
        }
    }
    /// 设置url允许的请求方法，默认为GET
    pub fn set_method(mut self, method: Method) -> Self {
        self.req.method = method;
        self
    }
    /// 设置需要参与签名的请求头，比如Content-Type或者x-oss-开头的头部
    ///
    /// 使用url发起请求时，必须携带相同的请求头
    pub fn set_header(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.req.insert_header(key, value);
        self
    }
    /// 生成url
    ///
    pub fn build(mut self) -> String {
        self.req.query_sign(self.expires);
        self.req.uri()
    }
}
