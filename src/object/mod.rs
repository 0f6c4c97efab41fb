//! 对象是 OSS 存储数据的基本单元，对象由元信息、用户数据和文件名（Key）组成，对象由存储空间内部唯一的Key来标识。

pub use self::append_object::AppendObject;
pub use self::copy_object::CopyObject;
pub use self::del_object::DelObject;
pub use self::get_object::GetObject;
pub use self::get_object_acl::GetObjectAcl;
pub use self::get_url::GetUrl;
pub use self::head_object::HeadObject;
#[doc(hidden)]
pub use self::oss_object::OssObject;
pub use self::put_object::PutObject;
pub use self::put_object_acl::PutObjectAcl;

mod append_object;
mod copy_object;
mod del_object;
mod get_object;
mod get_object_acl;
mod get_url;
mod head_object;
mod oss_object;
mod put_object;
mod put_object_acl;
