use crate::{
    common::xml_escape,
    error::normal_error,
    request::{Oss, OssRequest},
    Error,
};
use base64::{engine::general_purpose, Engine};
use hyper::Method;
use md5::{Digest, Md5};

/// 单次请求最多删除的文件数量
pub const MAX_DELETE_OBJECTS: usize = 1000;

/// 批量删除文件
///
/// 删除文件时，不会检查文件是否存在，只要请求合法，都会返回成功
///
/// 单次最多删除1000个文件，具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31983.html)
pub struct DelObjects {
    req: OssRequest,
    objects: Vec<String>,
}
impl DelObjects {
    pub(super) fn new(oss: Oss, files: Vec<impl ToString>) -> Self {
        let mut req = OssRequest::new(oss, Method::POST);
        req.insert_query("delete", "");
        let objects = files.into_iter().map(|v| v.to_string()).collect();
        DelObjects { req, objects }
    }
    /// 发送请求
    ///
    pub async fn send(mut self) -> Result<(), Error> {
        if self.objects.is_empty() {
            return Ok(());
        }
        //生成body
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Delete><Quiet>true</Quiet>{}</Delete>",
            self.objects
                .iter()
                .map(|v| format!("<Object><Key>{}</Key></Object>", xml_escape(v)))
                .collect::<String>()
        );
        //计算body md5值
        let mut hasher = Md5::new();
        hasher.update(&body);
        let body_md5 = general_purpose::STANDARD.encode(hasher.finalize());
        //插入header内容
        self.req.insert_header("Content-Length", body.len());
        self.req.insert_header("Content-MD5", body_md5);
        //插入body内容
        self.req.set_body(body.into());
        //构建http请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(()),
            _ => Err(normal_error(response).await),
        }
    }
}
