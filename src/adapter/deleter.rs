use super::{lister::walk, prefixer::PathPrefixer};
use crate::{bucket::MAX_DELETE_OBJECTS, store::ObjectStore, Error};
use futures_util::TryStreamExt;
use std::mem;
use tracing::{debug, info};

/// 删除目录及其下的全部内容
///
/// 深度列举得到的文件和子目录Key放入同一批次，每满1000个执行一次批量删除，最后删除目录本身。
/// 删除不是原子操作，中途失败时已经删除的文件不会恢复。
pub(crate) async fn delete_directory<S: ObjectStore + ?Sized>(
    store: &S,
    prefixer: &PathPrefixer,
    path: &str,
) -> Result<(), Error> {
    let root = prefixer.prefix_directory_path(path);
    let mut listed = walk(store, prefixer, path, true);
    let mut batch = Vec::with_capacity(MAX_DELETE_OBJECTS);
    let (mut batches, mut deleted) = (0usize, 0usize);
    while let Some(item) = listed.try_next().await? {
        batch.push(item.key);
        if batch.len() >= MAX_DELETE_OBJECTS {
            deleted += batch.len();
            batches += 1;
            debug!(root = %root, keys = batch.len(), "delete batch");
            store.delete_objects(mem::take(&mut batch)).await?;
        }
    }
    if !batch.is_empty() {
        deleted += batch.len();
        batches += 1;
        debug!(root = %root, keys = batch.len(), "delete batch");
        store.delete_objects(batch).await?;
    }
    //存储空间根目录没有目录Key
    if !root.is_empty() {
        store.delete_object(&root).await?;
    }
    info!(root = %root, batches, deleted, "directory deleted");
    Ok(())
}
