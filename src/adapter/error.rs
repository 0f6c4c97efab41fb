use crate::Error;
use thiserror::Error;

/// 文件系统操作失败，每类操作对应一个错误，均保留OSS返回的原始错误
#[derive(Error, Debug)]
pub enum FsError {
    #[error("检查文件是否存在失败：{path}")]
    CheckExistenceFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("写入文件失败：{path}")]
    WriteFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("读取文件失败：{path}")]
    ReadFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("删除文件失败：{path}")]
    DeleteFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("删除目录失败：{path}")]
    DeleteDirectoryFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("创建目录失败：{path}")]
    CreateDirectoryFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("复制文件失败：{source_path} -> {destination}")]
    CopyFailed {
        source_path: String,
        destination: String,
        #[source]
        source: Error,
    },
    #[error("设置文件访问权限失败：{path}")]
    SetVisibilityFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("获取文件元信息失败：{path}")]
    RetrieveMetadataFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("列举目录失败：{path}")]
    ListingFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("生成签名url失败：{path}")]
    SignUrlFailed {
        path: String,
        #[source]
        source: Error,
    },
    #[error("签名url的有效期必须大于0")]
    InvalidTtl,
}

impl FsError {
    /// OSS返回的原始错误
    pub fn source_error(&self) -> Option<&Error> {
        match self {
            FsError::CheckExistenceFailed { source, .. }
            | FsError::WriteFailed { source, .. }
            | FsError::ReadFailed { source, .. }
            | FsError::DeleteFailed { source, .. }
            | FsError::DeleteDirectoryFailed { source, .. }
            | FsError::CreateDirectoryFailed { source, .. }
            | FsError::CopyFailed { source, .. }
            | FsError::SetVisibilityFailed { source, .. }
            | FsError::RetrieveMetadataFailed { source, .. }
            | FsError::ListingFailed { source, .. }
            | FsError::SignUrlFailed { source, .. } => Some(source),
            FsError::InvalidTtl => None,
        }
    }
    /// OSS返回的错误代码
    pub fn code(&self) -> Option<&str> {
        self.source_error().and_then(Error::code)
    }
}
