use crate::{request::Oss, OssBucket};
use std::time::Duration;

/// OSS容器入口，保存AccessKey和网络相关的设置
#[derive(Debug, Clone)]
pub struct OssClient {
    pub(crate) oss: Oss,
}

impl OssClient {
    /// 初始化一个OssClient容器，以便后续使用
    ///
    /// - ak_id ： 阿里云AccessKey ID
    /// - ak_secret：阿里云AccessKey Secret
    ///
    pub fn new(ak_id: &str, ak_secret: &str) -> Self {
        OssClient {
            oss: Oss::new(ak_id, ak_secret),
        }
    }
    /// 禁用https
    pub fn disable_https(mut self) -> Self {
        self.oss.set_https(false);
        self
    }
    /// 使用STS临时授权时，设置SecurityToken
    pub fn set_security_token(mut self, security_token: impl ToString) -> Self {
        self.oss.set_security_token(security_token);
        self
    }
    /// 设置单次请求的超时时间
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.oss.set_timeout(Some(timeout));
        self
    }
    /// 设置建立连接的超时时间
    pub fn set_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.oss.set_connect_timeout(Some(connect_timeout));
        self
    }
    /// 初始化OssBucket
    pub fn bucket(&self, bucket: &str, endpoint: &str) -> OssBucket {
        OssBucket::new(self.oss.clone(), bucket, endpoint)
    }
}
