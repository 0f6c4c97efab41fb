mod common;

use aliyun_oss_fs::{
    common::{Acl, ByteStream, StorageClass},
    AliyunOssAdapter, Config, Entry, Error, FsError, OssOptions, UrlGenerator, Visibility,
};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use common::{Call, MemoryStore, LAST_MODIFIED};
use futures_util::{stream, TryStreamExt};
use hyper::Method;
use std::{collections::BTreeMap, io::Write, time::Duration};

fn adapter() -> AliyunOssAdapter<MemoryStore> {
    AliyunOssAdapter::new(MemoryStore::new(), "root")
}

#[tokio::test]
async fn written_file_reports_its_size() {
    let adapter = adapter();
    adapter
        .write(
            "file.md",
            "contents",
            &Config::new().set_header("Content-Type", "text/markdown"),
        )
        .await
        .unwrap();
    let metadata = adapter.metadata("file.md").await.unwrap();
    assert_eq!(metadata.path, "file.md");
    assert_eq!(metadata.size, 8);
    assert_eq!(adapter.file_size("file.md").await.unwrap(), 8);
    assert_eq!(
        adapter.mime_type("file.md").await.unwrap().as_deref(),
        Some("text/markdown")
    );
    assert_eq!(
        adapter.last_modified("file.md").await.unwrap(),
        Some(LAST_MODIFIED)
    );
    assert_eq!(adapter.store().calls()[0], Call::Put("root/file.md".to_owned()));
}

#[tokio::test]
async fn visibility_round_trips() {
    let adapter = adapter();
    adapter.write("file.md", "contents", &Config::new()).await.unwrap();
    adapter
        .set_visibility("file.md", Visibility::Private)
        .await
        .unwrap();
    assert_eq!(adapter.visibility("file.md").await.unwrap(), Visibility::Private);
    assert_eq!(
        adapter.store().object("root/file.md").unwrap().acl,
        Acl::Private
    );
    adapter
        .set_visibility("file.md", Visibility::Public)
        .await
        .unwrap();
    assert_eq!(adapter.visibility("file.md").await.unwrap(), Visibility::Public);
    assert_eq!(
        adapter.store().object("root/file.md").unwrap().acl,
        Acl::PublicRead
    );
}

#[tokio::test]
async fn write_with_visibility_sets_acl_header() {
    let adapter = adapter();
    adapter
        .write(
            "public.md",
            "contents",
            &Config::new().set_visibility(Visibility::Public),
        )
        .await
        .unwrap();
    let stored = adapter.store().object("root/public.md").unwrap();
    assert_eq!(
        stored.headers.get("x-oss-object-acl").map(String::as_str),
        Some("public-read")
    );
    assert_eq!(adapter.visibility("public.md").await.unwrap(), Visibility::Public);
}

#[tokio::test]
async fn default_acl_counts_as_public() {
    let adapter = adapter();
    adapter.store().insert("root/inherit.md", "contents");
    assert_eq!(adapter.visibility("inherit.md").await.unwrap(), Visibility::Public);
}

#[tokio::test]
async fn write_failure_wraps_store_error() {
    let adapter = adapter();
    adapter.store().fail("put_object");
    let error = adapter
        .write("file.md", "contents", &Config::new())
        .await
        .unwrap_err();
    match &error {
        FsError::WriteFailed { path, source } => {
            assert_eq!(path, "file.md");
            assert_eq!(source.code(), Some("InternalError"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(adapter.store().keys().is_empty());
}

#[tokio::test]
async fn move_stops_when_copy_fails() {
    let adapter = adapter();
    adapter.store().insert("root/from.md", "contents");
    adapter.store().fail("copy_object");
    let error = adapter.move_file("from.md", "to.md").await.unwrap_err();
    match &error {
        FsError::CopyFailed {
            source_path,
            destination,
            ..
        } => {
            assert_eq!(source_path, "from.md");
            assert_eq!(destination, "to.md");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!adapter
        .store()
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Delete(_))));
    assert!(adapter.store().object("root/from.md").is_some());
}

#[tokio::test]
async fn move_copies_then_deletes() {
    let adapter = adapter();
    adapter.store().insert("root/from.md", "contents");
    adapter.move_file("from.md", "dir/to.md").await.unwrap();
    assert_eq!(
        adapter.store().calls(),
        vec![
            Call::Copy("root/from.md".to_owned(), "root/dir/to.md".to_owned()),
            Call::Delete("root/from.md".to_owned()),
        ]
    );
    assert_eq!(adapter.read("dir/to.md").await.unwrap(), Bytes::from("contents"));
}

#[tokio::test]
async fn move_onto_the_same_key_keeps_the_file() {
    let adapter = adapter();
    adapter.store().insert("root/a.md", "contents");
    adapter.move_file("a.md", "/a.md").await.unwrap();
    assert!(adapter.store().calls().is_empty());
    assert_eq!(adapter.read("a.md").await.unwrap(), Bytes::from("contents"));
}

#[tokio::test]
async fn move_reports_delete_failure() {
    let adapter = adapter();
    adapter.store().insert("root/from.md", "contents");
    adapter.store().fail("delete_object");
    let error = adapter.move_file("from.md", "to.md").await.unwrap_err();
    assert!(matches!(error, FsError::DeleteFailed { .. }));
}

#[tokio::test]
async fn copy_of_missing_file_fails() {
    let adapter = adapter();
    let error = adapter.copy("missing.md", "to.md").await.unwrap_err();
    assert!(error.source_error().unwrap().is_not_found());
}

#[tokio::test]
async fn file_and_directory_existence() {
    let adapter = adapter();
    adapter.store().insert("root/dir/file.md", "contents");
    assert!(adapter.file_exists("dir/file.md").await.unwrap());
    assert!(!adapter.file_exists("dir/other.md").await.unwrap());
    assert!(adapter.directory_exists("dir").await.unwrap());
    assert!(!adapter.directory_exists("missing").await.unwrap());
    adapter.store().fail("object_exists");
    let error = adapter.file_exists("dir/file.md").await.unwrap_err();
    assert!(matches!(error, FsError::CheckExistenceFailed { .. }));
}

#[tokio::test]
async fn read_whole_file_and_stream() {
    let adapter = adapter();
    adapter.store().insert("root/file.md", "streamed contents");
    assert_eq!(
        adapter.read("file.md").await.unwrap(),
        Bytes::from("streamed contents")
    );
    let chunks: Vec<Bytes> = adapter
        .read_stream("file.md")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.concat(), b"streamed contents".to_vec());
}

#[tokio::test]
async fn read_missing_file_fails() {
    let adapter = adapter();
    let error = adapter.read("missing.md").await.unwrap_err();
    assert!(matches!(error, FsError::ReadFailed { .. }));
    assert_eq!(error.code(), Some("NoSuchKey"));
    assert!(matches!(
        adapter.read_stream("missing.md").await,
        Err(FsError::ReadFailed { .. })
    ));
}

#[tokio::test]
async fn metadata_of_missing_file_fails() {
    let adapter = adapter();
    let error = adapter.metadata("missing.md").await.unwrap_err();
    assert!(matches!(error, FsError::RetrieveMetadataFailed { .. }));
    let error = adapter.visibility("missing.md").await.unwrap_err();
    assert!(matches!(error, FsError::RetrieveMetadataFailed { .. }));
    let error = adapter
        .set_visibility("missing.md", Visibility::Public)
        .await
        .unwrap_err();
    assert!(matches!(error, FsError::SetVisibilityFailed { .. }));
}

#[tokio::test]
async fn delete_file() {
    let adapter = adapter();
    adapter.store().insert("root/file.md", "contents");
    adapter.delete("/file.md").await.unwrap();
    assert!(adapter.store().keys().is_empty());
    adapter.store().fail("delete_object");
    assert!(matches!(
        adapter.delete("file.md").await,
        Err(FsError::DeleteFailed { .. })
    ));
}

#[tokio::test]
async fn create_directory_writes_marker() {
    let adapter = adapter();
    adapter
        .create_directory("new/dir", &Config::new())
        .await
        .unwrap();
    let marker = adapter.store().object("root/new/dir/").unwrap();
    assert!(marker.content.is_empty());
    let entries: Vec<Entry> = adapter.list_contents("new", false).try_collect().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), "new/dir");
    assert!(entries[0].is_dir());
    adapter.store().fail("put_object");
    assert!(matches!(
        adapter.create_directory("other", &Config::new()).await,
        Err(FsError::CreateDirectoryFailed { .. })
    ));
}

#[tokio::test]
async fn create_bucket_root_is_a_no_op() {
    let adapter = AliyunOssAdapter::new(MemoryStore::new(), "");
    adapter.create_directory("/", &Config::new()).await.unwrap();
    assert!(adapter.store().calls().is_empty());
}

#[tokio::test]
async fn write_stream_collects_chunks() {
    let adapter = adapter();
    let chunks: Vec<Result<Bytes, Error>> =
        vec![Ok(Bytes::from("con")), Ok(Bytes::from("tents"))];
    let body: ByteStream = Box::pin(stream::iter(chunks));
    adapter
        .write_stream("stream.md", body, &Config::new())
        .await
        .unwrap();
    assert_eq!(adapter.file_size("stream.md").await.unwrap(), 8);
}

#[tokio::test]
async fn upload_local_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"local contents").unwrap();
    let local = file.path().to_str().unwrap().to_owned();
    let adapter = adapter();
    adapter
        .upload_file("upload.txt", &local, &Config::new())
        .await
        .unwrap();
    assert_eq!(
        adapter.read("upload.txt").await.unwrap(),
        Bytes::from("local contents")
    );
}

#[tokio::test]
async fn append_returns_next_position() {
    let adapter = adapter();
    let next = adapter
        .append("log.txt", "hello", 0, &Config::new())
        .await
        .unwrap();
    assert_eq!(next, 5);
    let next = adapter
        .append("log.txt", " world", next, &Config::new())
        .await
        .unwrap();
    assert_eq!(next, 11);
    assert_eq!(adapter.read("log.txt").await.unwrap(), Bytes::from("hello world"));
    let error = adapter
        .append("log.txt", "!", 0, &Config::new())
        .await
        .unwrap_err();
    assert_eq!(error.code(), Some("PositionNotEqualToLength"));
}

#[tokio::test]
async fn adapter_options_are_merged_into_writes() {
    let defaults = OssOptions {
        headers: BTreeMap::from([("Cache-Control".to_owned(), "max-age=60".to_owned())]),
        storage_class: Some(StorageClass::IA),
        check_md5: None,
    };
    let adapter = adapter().set_options(defaults);
    adapter
        .write(
            "file.md",
            "contents",
            &Config::new().set_header("x-oss-meta-author", "alice"),
        )
        .await
        .unwrap();
    let headers = adapter.store().object("root/file.md").unwrap().headers;
    assert_eq!(headers.get("cache-control").map(String::as_str), Some("max-age=60"));
    assert_eq!(headers.get("x-oss-storage-class").map(String::as_str), Some("IA"));
    assert_eq!(headers.get("x-oss-meta-author").map(String::as_str), Some("alice"));
}

#[tokio::test]
async fn page_objects_walks_one_page_at_a_time() {
    let store = MemoryStore::new().with_objects([
        "root/uploads/",
        "root/uploads/a.txt",
        "root/uploads/b.txt",
        "root/uploads/c.txt",
        "root/uploads/d.txt",
        "root/uploads/e.txt",
    ]);
    let adapter = AliyunOssAdapter::new(store, "root");
    let first = adapter.page_objects("uploads", 2, None).await.unwrap();
    let paths = first.iter().map(Entry::path).collect::<Vec<_>>();
    assert_eq!(paths, vec!["uploads/a.txt", "uploads/b.txt"]);
    let second = adapter
        .page_objects("uploads", 2, Some(first[1].path()))
        .await
        .unwrap();
    let paths = second.iter().map(Entry::path).collect::<Vec<_>>();
    assert_eq!(paths, vec!["uploads/c.txt", "uploads/d.txt"]);
    match &adapter.store().calls()[1] {
        Call::List(request) => {
            assert_eq!(request.start_after.as_deref(), Some("root/uploads/b.txt"));
            assert_eq!(request.max_keys, 3);
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn page_objects_does_not_repeat_directories() {
    let store = MemoryStore::new().with_objects([
        "uploads/a.txt",
        "uploads/dir/x.txt",
        "uploads/z.txt",
    ]);
    let adapter = AliyunOssAdapter::new(store, "");
    let first = adapter.page_objects("uploads", 2, None).await.unwrap();
    let paths = first.iter().map(Entry::path).collect::<Vec<_>>();
    assert_eq!(paths, vec!["uploads/a.txt", "uploads/dir"]);
    let second = adapter
        .page_objects("uploads", 2, Some("uploads/dir"))
        .await
        .unwrap();
    let paths = second.iter().map(Entry::path).collect::<Vec<_>>();
    assert_eq!(paths, vec!["uploads/z.txt"]);
}

#[tokio::test]
async fn urls() {
    let adapter = adapter();
    assert_eq!(adapter.public_url("file.md"), None);
    let adapter = adapter.set_url_generator(
        UrlGenerator::new("bucket", "oss-cn-hangzhou.aliyuncs.com").set_domain("cdn.example.com"),
    );
    assert_eq!(
        adapter.public_url("file.md").as_deref(),
        Some("https://cdn.example.com/root/file.md")
    );
    let expiration = Utc.timestamp_opt(LAST_MODIFIED, 0).unwrap();
    assert_eq!(
        adapter
            .temporary_url("file.md", expiration, &Config::new())
            .unwrap(),
        format!("https://cdn.example.com/root/file.md?Expires={}&Method=GET", LAST_MODIFIED)
    );
    let signed = adapter
        .sign_url("file.md", Duration::from_secs(60), Method::PUT, &Config::new())
        .unwrap();
    assert!(signed.starts_with("https://bucket.oss-cn-hangzhou.aliyuncs.com/root/file.md?"));
    assert!(signed.ends_with("&Method=PUT"));
    assert!(matches!(
        adapter.sign_url("file.md", Duration::ZERO, Method::GET, &Config::new()),
        Err(FsError::InvalidTtl)
    ));
}

fn is_invalid_key(error: &FsError) -> bool {
    matches!(error.source_error(), Some(Error::InvalidObjectKey))
}

#[tokio::test]
async fn bucket_root_is_not_an_object() {
    let adapter = AliyunOssAdapter::new(MemoryStore::new(), "");
    adapter.store().insert("a.md", "contents");
    let config = Config::new();

    let error = adapter.delete("").await.unwrap_err();
    assert!(matches!(error, FsError::DeleteFailed { .. }) && is_invalid_key(&error));
    let error = adapter.set_visibility("/", Visibility::Public).await.unwrap_err();
    assert!(matches!(error, FsError::SetVisibilityFailed { .. }) && is_invalid_key(&error));
    let error = adapter.visibility("/").await.unwrap_err();
    assert!(matches!(error, FsError::RetrieveMetadataFailed { .. }) && is_invalid_key(&error));
    let error = adapter.write("", "contents", &config).await.unwrap_err();
    assert!(matches!(error, FsError::WriteFailed { .. }) && is_invalid_key(&error));
    let error = adapter.append("/", "contents", 0, &config).await.unwrap_err();
    assert!(matches!(error, FsError::WriteFailed { .. }) && is_invalid_key(&error));
    let error = adapter.read("").await.unwrap_err();
    assert!(matches!(error, FsError::ReadFailed { .. }) && is_invalid_key(&error));
    let error = adapter.metadata("/").await.unwrap_err();
    assert!(matches!(error, FsError::RetrieveMetadataFailed { .. }) && is_invalid_key(&error));
    let error = adapter.file_exists("").await.unwrap_err();
    assert!(matches!(error, FsError::CheckExistenceFailed { .. }) && is_invalid_key(&error));
    let error = adapter.copy("a.md", "/").await.unwrap_err();
    assert!(matches!(error, FsError::CopyFailed { .. }) && is_invalid_key(&error));
    let error = adapter.move_file("/", "").await.unwrap_err();
    assert!(matches!(error, FsError::CopyFailed { .. }) && is_invalid_key(&error));
    let error = adapter
        .sign_url("", Duration::from_secs(60), Method::DELETE, &config)
        .unwrap_err();
    assert!(matches!(error, FsError::SignUrlFailed { .. }) && is_invalid_key(&error));

    assert!(adapter.store().calls().is_empty());
    assert_eq!(adapter.store().keys(), vec!["a.md".to_owned()]);
}
