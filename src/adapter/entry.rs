use chrono::DateTime;

/// 文件信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// 逻辑路径
    pub path: String,
    pub size: u64,
    /// 最后修改时间，Unix时间戳（秒）
    pub last_modified: Option<i64>,
    pub mime_type: Option<String>,
}

/// 目录信息，路径不以 `/` 结尾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: String,
    pub last_modified: Option<i64>,
}

/// 列举得到的条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::File(file) => &file.path,
            Entry::Directory(dir) => &dir.path,
        }
    }
    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }
    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }
    pub fn last_modified(&self) -> Option<i64> {
        match self {
            Entry::File(file) => file.last_modified,
            Entry::Directory(dir) => dir.last_modified,
        }
    }
}

// 列举结果中的时间为ISO8601格式
pub(crate) fn parse_list_time(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value).ok().map(|v| v.timestamp())
}

// HEAD返回的Last-Modified为RFC 1123格式
pub(crate) fn parse_header_time(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc2822(value).ok().map(|v| v.timestamp())
}
