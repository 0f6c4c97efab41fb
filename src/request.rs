use crate::{common::url_encode, Error};
use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, Utc};
use hyper::{client::HttpConnector, header, Body, Client, Method, Request, Response};
use hyper_tls::HttpsConnector;
use ring::hmac;
use std::{borrow::Cow, collections::BTreeMap, time::Duration};

// 需要参与签名的子资源
const SUB_RESOURCES: [&str; 16] = [
    "acl",
    "append",
    "continuation-token",
    "delete",
    "objectMeta",
    "position",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "security-token",
    "symlink",
    "tagging",
    "versionId",
];

pub(crate) type HttpClient = Client<HttpsConnector<HttpConnector>>;

pub(crate) fn http_client(connect_timeout: Option<Duration>) -> HttpClient {
    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(connect_timeout);
    Client::builder().build::<_, Body>(HttpsConnector::new_with_connector(http))
}

//Oss基础结构
#[derive(Debug, Clone)]
pub(crate) struct Oss {
    pub ak_id: Cow<'static, str>,
    pub ak_secret: Cow<'static, str>,
    pub security_token: Option<Cow<'static, str>>,
    pub endpoint: Cow<'static, str>,
    pub bucket: Option<Cow<'static, str>>,
    pub object: Option<Cow<'static, str>>,
    pub enable_https: bool,
    pub is_cname: bool,
    pub timeout: Option<Duration>,
    pub client: HttpClient,
}
impl Oss {
    pub fn new(ak_id: &str, ak_secret: &str) -> Self {
        Oss {
            ak_id: ak_id.to_owned().into(),
            ak_secret: ak_secret.to_owned().into(),
            security_token: None,
            endpoint: "oss.aliyuncs.com".to_owned().into(),
            bucket: None,
            object: None,
            enable_https: true,
            is_cname: false,
            timeout: None,
            client: http_client(None),
        }
    }
    pub fn set_bucket(&mut self, bucket: impl ToString) {
        self.bucket = Some(bucket.to_string().into());
    }
    pub fn set_endpoint(&mut self, endpoint: impl ToString) {
        self.endpoint = endpoint.to_string().into();
    }
    pub fn set_object(&mut self, object: impl ToString) {
        self.object = Some(object.to_string().into());
    }
    pub fn set_https(&mut self, https: bool) {
        self.enable_https = https;
    }
    pub fn set_cname(&mut self, is_cname: bool) {
        self.is_cname = is_cname;
    }
    pub fn set_security_token(&mut self, security_token: impl ToString) {
        self.security_token = Some(security_token.to_string().into());
    }
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
    pub fn set_connect_timeout(&mut self, connect_timeout: Option<Duration>) {
        self.client = http_client(connect_timeout);
    }
    //请求的域名，使用自定义域名时不拼接bucket
    pub fn host(&self) -> String {
        match (&self.bucket, self.is_cname) {
            (Some(bucket), false) => format!("{}.{}", bucket, self.endpoint),
            _ => self.endpoint.to_string(),
        }
    }
    pub fn scheme(&self) -> &'static str {
        if self.enable_https {
            "https"
        } else {
            "http"
        }
    }
}

#[derive(Debug)]
pub(crate) struct OssRequest {
    pub oss: Oss,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub querys: BTreeMap<String, String>,
    pub body: Body,
}
impl OssRequest {
    pub fn new(oss: Oss, method: Method) -> Self {
        OssRequest {
            oss,
            method,
            headers: BTreeMap::new(),
            querys: BTreeMap::new(),
            body: Body::empty(),
        }
    }
    // header名称统一使用小写
    pub fn insert_header(&mut self, key: impl ToString, value: impl ToString) {
        self.headers
            .insert(key.to_string().to_ascii_lowercase(), value.to_string());
    }
    pub fn insert_query(&mut self, key: impl ToString, value: impl ToString) {
        self.querys.insert(key.to_string(), value.to_string());
    }
    pub fn set_body(&mut self, body: Body) {
        self.body = body;
    }
    pub fn uri(&self) -> String {
        let query = self
            .querys
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_string()
                } else {
                    format!("{}={}", key, url_encode(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        let query_str = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        };
        format!(
            "{}://{}/{}{}",
            self.oss.scheme(),
            self.oss.host(),
            url_encode(self.oss.object.as_deref().unwrap_or_default()),
            query_str
        )
    }
    //生成待签名字符串，date在header签名时是GMT时间，在url签名时是过期时间戳
    fn string_to_sign(&self, date: &str) -> String {
        let content_type = self
            .headers
            .get("content-type")
            .map(String::as_str)
            .unwrap_or_default();
        let content_md5 = self
            .headers
            .get("content-md5")
            .map(String::as_str)
            .unwrap_or_default();
        //处理canonicalized_ossheaders，BTreeMap已经按key排序
        let canonicalized_ossheaders = self
            .headers
            .iter()
            .filter(|(key, _)| key.starts_with("x-oss-"))
            .map(|(key, value)| format!("{}:{}\n", key, value.trim()))
            .collect::<String>();
        //构建sub_resource
        let sub_resource = self
            .querys
            .iter()
            .filter(|(key, _)| SUB_RESOURCES.contains(&key.as_str()))
            .map(|(key, value)| {
                if value.is_empty() {
                    key.to_owned()
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        //构建canonicalized_resource
        let mut canonicalized_resource = format!(
            "/{}{}",
            self.oss
                .bucket
                .as_deref()
                .map_or(String::new(), |v| format!("{}/", v)),
            self.oss.object.as_deref().unwrap_or_default()
        );
        if !sub_resource.is_empty() {
            canonicalized_resource.push('?');
            canonicalized_resource.push_str(&sub_resource);
        }
        format!(
            "{}\n{}\n{}\n{}\n{}{}",
            self.method,
            content_md5,
            content_type,
            date,
            canonicalized_ossheaders,
            canonicalized_resource
        )
    }
    fn signature(&self, unsign_str: &str) -> String {
        let key_str = hmac::Key::new(
            hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            self.oss.ak_secret.as_bytes(),
        );
        general_purpose::STANDARD.encode(hmac::sign(&key_str, unsign_str.as_bytes()))
    }
    pub fn query_sign(&mut self, expires: DateTime<Utc>) {
        if let Some(security_token) = self.oss.security_token.clone() {
            self.insert_query("security-token", security_token);
        }
        let expires = expires.timestamp().to_string();
        let sign_str = self.signature(&self.string_to_sign(&expires));
        self.insert_query("OSSAccessKeyId", self.oss.ak_id.clone());
        self.insert_query("Expires", expires);
        self.insert_query("Signature", sign_str);
    }
    pub fn header_sign(&mut self) {
        if let Some(security_token) = self.oss.security_token.clone() {
            self.insert_header("x-oss-security-token", security_token);
        }
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let sign_str = self.signature(&self.string_to_sign(&date));
        self.insert_header(header::DATE, date);
        self.insert_header(
            header::AUTHORIZATION,
            format!("OSS {}:{}", self.oss.ak_id, sign_str),
        );
    }
    pub async fn send_to_oss(mut self) -> Result<Response<Body>, Error> {
        //完成签名
        self.header_sign();
        //构建http请求
        let mut req = Request::builder().method(&self.method).uri(self.uri());
        for (key, value) in self.headers.iter() {
            req = req.header(key, value);
        }
        let request = req.body(self.body)?;
        let response = self.oss.client.request(request);
        match self.oss.timeout {
            Some(timeout) => tokio::time::timeout(timeout, response)
                .await
                .map_err(|_| Error::Timeout)?
                .map_err(Error::from),
            None => Ok(response.await?),
        }
    }
}
