use super::{DelObjects, ListObjects};
use crate::{request::Oss, OssObject};

/// OSS存储空间，实现了列举文件、批量删除文件等API
#[derive(Debug, Clone)]
pub struct OssBucket {
    pub(crate) oss: Oss,
}

impl OssBucket {
    pub(crate) fn new(mut oss: Oss, bucket: impl ToString, endpoint: impl ToString) -> Self {
        oss.set_bucket(bucket);
        oss.set_endpoint(endpoint);
        OssBucket { oss }
    }
    /// 设置自定义域名
    ///
    /// 使用自定义域名访问时，请求的域名不再拼接存储空间名称
    pub fn set_custom_domain(mut self, custom_domain: impl ToString, enable_https: bool) -> Self {
        self.oss.set_endpoint(custom_domain);
        self.oss.set_https(enable_https);
        self.oss.set_cname(true);
        self
    }
    /// 存储空间名称
    pub fn name(&self) -> &str {
        self.oss.bucket.as_deref().unwrap_or_default()
    }
    /// 初始化OssObject
    pub fn object(&self, object: impl ToString) -> OssObject {
        OssObject::new(self.oss.clone(), object)
    }
    /// 查询存储空间中全部文件信息
    pub fn list_objects(&self) -> ListObjects {
        ListObjects::new(self.oss.clone())
    }
    /// 批量删除文件
    pub fn del_objects(&self, files: Vec<impl ToString>) -> DelObjects {
        DelObjects::new(self.oss.clone(), files)
    }
}
