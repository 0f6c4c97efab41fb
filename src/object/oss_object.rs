use super::{
    AppendObject, CopyObject, DelObject, GetObject, GetObjectAcl, GetUrl, HeadObject, PutObject,
    PutObjectAcl,
};
use crate::{common::Acl, request::Oss};
use chrono::{DateTime, Utc};

/// OSS对象，实现了上传文件、删除文件等API
#[derive(Debug, Clone)]
pub struct OssObject {
    pub(crate) oss: Oss,
}

impl OssObject {
    pub(crate) fn new(mut oss: Oss, object: impl ToString) -> Self {
        oss.set_object(object);
        OssObject { oss }
    }
    /// 上传文件到OSS
    pub fn put_object(&self) -> PutObject {
        PutObject::new(self.oss.clone())
    }
    /// 追加内容到Appendable类型的文件
    pub fn append_object(&self, position: u64) -> AppendObject {
        AppendObject::new(self.oss.clone(), position)
    }
    /// 获取文件内容
    pub fn get_object(&self) -> GetObject {
        GetObject::new(self.oss.clone())
    }
    /// 获取文件的元信息
    pub fn head_object(&self) -> HeadObject {
        HeadObject::new(self.oss.clone())
    }
    /// 删除文件
    pub fn del_object(&self) -> DelObject {
        DelObject::new(self.oss.clone())
    }
    /// 从同一存储空间的其他文件拷贝
    pub fn copy_object(&self, source: &str) -> CopyObject {
        CopyObject::new(self.oss.clone(), source)
    }
    /// 获取文件的ACL
    pub fn get_object_acl(&self) -> GetObjectAcl {
        GetObjectAcl::new(self.oss.clone())
    }
    /// 设置文件的ACL
    pub fn put_object_acl(&self, acl: Acl) -> PutObjectAcl {
        PutObjectAcl::new(self.oss.clone(), acl)
    }
    /// 获取文件访问url
    pub fn get_url(&self, expires: DateTime<Utc>) -> GetUrl {
        GetUrl::new(self.oss.clone(), expires)
    }
}
