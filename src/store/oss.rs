use super::{ListObjectsRequest, ListPage, ObjectStore, PutOptions};
use crate::{
    common::{Acl, ByteStream, ObjectMeta},
    object::PutObject,
    Error, OssBucket,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hyper::Method;
use std::collections::BTreeMap;

fn apply_options(mut put: PutObject, options: &PutOptions) -> PutObject {
    for (key, value) in options.headers.iter() {
        put = put.set_header(key, value);
    }
    put.enable_md5(options.check_md5)
}

#[async_trait]
impl ObjectStore for OssBucket {
    async fn object_exists(&self, key: &str) -> Result<bool, Error> {
        match self.object(key).head_object().send().await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
    async fn put_object(&self, key: &str, content: Bytes, options: &PutOptions) -> Result<(), Error> {
        let put = apply_options(self.object(key).put_object(), options);
        put.send_content(content).await.map(|_| ())
    }
    async fn put_object_stream(
        &self,
        key: &str,
        stream: ByteStream,
        options: &PutOptions,
    ) -> Result<(), Error> {
        let put = apply_options(self.object(key).put_object(), options);
        put.send_stream(stream).await.map(|_| ())
    }
    async fn put_object_file(&self, key: &str, file: &str, options: &PutOptions) -> Result<(), Error> {
        let put = apply_options(self.object(key).put_object(), options);
        put.send_file(file).await.map(|_| ())
    }
    async fn append_object(
        &self,
        key: &str,
        content: Bytes,
        position: u64,
        options: &PutOptions,
    ) -> Result<u64, Error> {
        let mut append = self.object(key).append_object(position);
        for (name, value) in options.headers.iter() {
            append = append.set_header(name, value);
        }
        append.send_content(content).await
    }
    async fn get_object(&self, key: &str) -> Result<Bytes, Error> {
        self.object(key).get_object().download_to_buf().await
    }
    async fn get_object_stream(&self, key: &str) -> Result<ByteStream, Error> {
        self.object(key).get_object().download_to_stream().await
    }
    async fn delete_object(&self, key: &str) -> Result<(), Error> {
        self.object(key).del_object().send().await
    }
    async fn delete_objects(&self, keys: Vec<String>) -> Result<(), Error> {
        self.del_objects(keys).send().await
    }
    async fn copy_object(&self, source: &str, destination: &str) -> Result<(), Error> {
        self.object(destination).copy_object(source).send().await
    }
    async fn get_object_acl(&self, key: &str) -> Result<Acl, Error> {
        self.object(key).get_object_acl().send().await
    }
    async fn put_object_acl(&self, key: &str, acl: Acl) -> Result<(), Error> {
        self.object(key).put_object_acl(acl).send().await
    }
    async fn head_object(&self, key: &str) -> Result<ObjectMeta, Error> {
        self.object(key).head_object().send().await
    }
    async fn list_objects(&self, request: &ListObjectsRequest) -> Result<ListPage, Error> {
        let mut list = OssBucket::list_objects(self)
            .set_prefix(&request.prefix)
            .set_max_keys(request.max_keys);
        if let Some(delimiter) = &request.delimiter {
            list = list.set_delimiter(delimiter);
        }
        if let Some(token) = &request.continuation_token {
            list = list.set_continuation_token(token);
        }
        if let Some(start_after) = &request.start_after {
            list = list.set_start_after(start_after);
        }
        let result = list.send().await?;
        Ok(ListPage {
            objects: result.contents,
            common_prefixes: result
                .common_prefixes
                .into_iter()
                .map(|v| v.prefix)
                .collect(),
            is_truncated: result.is_truncated,
            next_continuation_token: result.next_continuation_token,
        })
    }
    fn sign_url(
        &self,
        key: &str,
        expires: DateTime<Utc>,
        method: Method,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, Error> {
        let mut url = self.object(key).get_url(expires).set_method(method);
        for (name, value) in headers.iter() {
            url = url.set_header(name, value);
        }
        Ok(url.build())
    }
}
