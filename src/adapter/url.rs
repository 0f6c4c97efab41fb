use crate::common::url_encode;

/// 拼接文件的公开访问地址，并把签名url中的请求域名替换为对外域名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGenerator {
    scheme: &'static str,
    bucket: String,
    endpoint: String,
    is_cname: bool,
    domain: Option<String>,
    internal: Option<String>,
}

impl UrlGenerator {
    pub fn new(bucket: impl ToString, endpoint: impl ToString) -> Self {
        UrlGenerator {
            scheme: "https",
            bucket: bucket.to_string(),
            endpoint: endpoint.to_string(),
            is_cname: false,
            domain: None,
            internal: None,
        }
    }
    pub fn set_https(mut self, enable_https: bool) -> Self {
        self.scheme = if enable_https { "https" } else { "http" };
        self
    }
    /// endpoint本身就是自定义域名
    pub fn set_cname(mut self, is_cname: bool) -> Self {
        self.is_cname = is_cname;
        self
    }
    /// 对外访问使用的自定义域名
    pub fn set_domain(mut self, domain: impl ToString) -> Self {
        self.domain = Some(domain.to_string());
        self
    }
    /// 发起请求时使用的内网endpoint
    pub fn set_internal(mut self, internal: impl ToString) -> Self {
        self.internal = Some(internal.to_string());
        self
    }
    fn host(&self, endpoint: &str) -> String {
        if self.is_cname {
            endpoint.to_owned()
        } else {
            format!("{}.{}", self.bucket, endpoint)
        }
    }
    /// 对外访问的域名
    pub fn public_host(&self) -> String {
        match &self.domain {
            Some(domain) => domain.clone(),
            None => self.host(&self.endpoint),
        }
    }
    /// 文件Key对应的访问地址
    pub fn full_url(&self, key: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.public_host(), url_encode(key))
    }
    /// 把url中的内网域名或者默认域名替换为对外访问的域名
    pub fn correct_domain(&self, url: &str) -> String {
        let public_host = format!("://{}/", self.public_host());
        let mut candidates = Vec::with_capacity(2);
        if let Some(internal) = &self.internal {
            candidates.push(format!("://{}/", self.host(internal)));
        }
        candidates.push(format!("://{}/", self.host(&self.endpoint)));
        for candidate in candidates {
            if url.contains(&candidate) {
                return url.replacen(&candidate, &public_host, 1);
            }
        }
        url.to_owned()
    }
}
