/// 逻辑路径和OSS文件Key之间的转换
///
/// 配置的前缀为空时不做任何转换；非空时统一为以一个 `/` 结尾
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPrefixer {
    prefix: String,
}

// 去掉开头的 `/`，合并连续的 `/`，保留结尾的单个 `/`
fn normalize(path: &str) -> String {
    let mut normalized = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    if path.ends_with('/') && !normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

impl PathPrefixer {
    pub fn new(prefix: &str) -> Self {
        let mut prefix = normalize(prefix);
        if !prefix.is_empty() && !prefix.ends_with('/') {
            prefix.push('/');
        }
        PathPrefixer { prefix }
    }
    /// 规范化后的前缀
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
    /// 逻辑路径转换为文件Key
    pub fn prefix_path(&self, path: &str) -> String {
        format!("{}{}", self.prefix, normalize(path))
    }
    /// 逻辑路径转换为目录Key，结果非空时以 `/` 结尾
    pub fn prefix_directory_path(&self, path: &str) -> String {
        let mut prefixed = self.prefix_path(path);
        if !prefixed.is_empty() && !prefixed.ends_with('/') {
            prefixed.push('/');
        }
        prefixed
    }
    /// 文件Key转换为逻辑路径
    ///
    /// Key必须来自同一前缀下的列举结果
    pub fn strip_prefix<'a>(&self, key: &'a str) -> &'a str {
        debug_assert!(key.starts_with(&self.prefix), "{} 不在前缀 {} 下", key, self.prefix);
        key.strip_prefix(self.prefix.as_str()).unwrap_or(key)
    }
    /// 目录Key转换为逻辑路径，去掉结尾的 `/`
    pub fn strip_directory_prefix<'a>(&self, key: &'a str) -> &'a str {
        self.strip_prefix(key).trim_end_matches('/')
    }
}
