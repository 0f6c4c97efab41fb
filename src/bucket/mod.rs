//! 存储空间是用于存储文件（Object）的容器，所有的文件都必须隶属于某个存储空间。

#[doc(hidden)]
pub use self::oss_bucket::OssBucket;
pub use self::{
    del_objects::{DelObjects, MAX_DELETE_OBJECTS},
    list_objects::ListObjects,
};

mod del_objects;
mod list_objects;
mod oss_bucket;
