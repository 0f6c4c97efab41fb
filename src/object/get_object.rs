use crate::{
    common::ByteStream,
    error::normal_error,
    request::{Oss, OssRequest},
    Error,
};
use bytes::Bytes;
use futures_util::StreamExt;
use hyper::{body::to_bytes, Method};

/// 获取文件内容
///
/// 具体详情查阅 [阿里云官方文档](https://help.aliyun.com/document_detail/31980.html)
pub struct GetObject {
    req: OssRequest,
}
impl GetObject {
    pub(super) fn new(oss: Oss) -> Self {
        GetObject {
            req: OssRequest::new(oss, Method::GET),
        }
    }
    /// 下载文件，直接将内容返回
    ///
    /// 如果文件较大，此方法可能占用过多内存，谨慎使用
    pub async fn download_to_buf(self) -> Result<Bytes, Error> {
        //发起请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => Ok(to_bytes(response.into_body()).await?),
            _ => Err(normal_error(response).await),
        }
    }
    /// 下载文件，返回一个数据流
    ///
    /// 如果文件较大，又不希望直接保存成文件，可以使用此方法，自行对流进行加工
    ///
    /// ```ignore
    /// use futures_util::StreamExt;
    ///
    /// let mut stream = object.get_object().download_to_stream().await?;
    /// while let Some(item) = stream.next().await {
    ///     let bytes = item?;
    ///     // Do something with bytes...
    /// }
    /// ```
    pub async fn download_to_stream(self) -> Result<ByteStream, Error> {
        //发起请求
        let response = self.req.send_to_oss().await?;
        //拆解响应消息
        let status_code = response.status();
        match status_code {
            code if code.is_success() => {
                let stream = response
                    .into_body()
                    .map(|item| item.map_err(Error::from));
                Ok(Box::pin(stream))
            }
            _ => Err(normal_error(response).await),
        }
    }
}
