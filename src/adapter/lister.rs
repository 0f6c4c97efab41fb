use super::{
    entry::{parse_list_time, DirectoryEntry, Entry, FileEntry},
    prefixer::PathPrefixer,
};
use crate::{
    store::{ListObjectsRequest, ListPage, ObjectStore},
    Error,
};
use futures_util::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

/// 单次列举的最大数量
pub(crate) const LIST_PAGE_SIZE: u32 = 1000;

/// 列举得到的条目以及它对应的Key，目录的Key以 `/` 结尾
pub(crate) struct Listed {
    pub entry: Entry,
    pub key: String,
}

/// 把一页列举结果转换为条目
///
/// 先是文件，再是子目录，各自保持存储服务返回的顺序；等于root本身的Key会被跳过
pub(crate) fn page_entries(prefixer: &PathPrefixer, root: &str, page: ListPage) -> Vec<Listed> {
    let mut listed = Vec::with_capacity(page.objects.len() + page.common_prefixes.len());
    for object in page.objects {
        if object.key == root {
            continue;
        }
        let last_modified = parse_list_time(&object.last_modified);
        let entry = if object.key.ends_with('/') {
            Entry::Directory(DirectoryEntry {
                path: prefixer.strip_directory_prefix(&object.key).to_owned(),
                last_modified,
            })
        } else {
            Entry::File(FileEntry {
                path: prefixer.strip_prefix(&object.key).to_owned(),
                size: object.size,
                last_modified,
                mime_type: None,
            })
        };
        listed.push(Listed {
            entry,
            key: object.key,
        });
    }
    for prefix in page.common_prefixes {
        if prefix == root {
            continue;
        }
        listed.push(Listed {
            entry: Entry::Directory(DirectoryEntry {
                path: prefixer.strip_directory_prefix(&prefix).to_owned(),
                last_modified: None,
            }),
            key: prefix,
        });
    }
    listed
}

enum Pending {
    Item(Listed),
    Descend(String),
}

// 一层目录的列举状态
struct Frame {
    prefix: String,
    token: Option<String>,
    pending: VecDeque<Pending>,
    exhausted: bool,
}

impl Frame {
    fn new(prefix: String) -> Self {
        Frame {
            prefix,
            token: None,
            pending: VecDeque::new(),
            exhausted: false,
        }
    }
}

struct Walker<'a, S: ?Sized> {
    store: &'a S,
    prefixer: &'a PathPrefixer,
    deep: bool,
    stack: Vec<Frame>,
}

impl<'a, S: ObjectStore + ?Sized> Walker<'a, S> {
    async fn next_listed(&mut self) -> Result<Option<Listed>, Error> {
        loop {
            let frame = match self.stack.last_mut() {
                Some(frame) => frame,
                None => return Ok(None),
            };
            match frame.pending.pop_front() {
                Some(Pending::Item(listed)) => return Ok(Some(listed)),
                Some(Pending::Descend(prefix)) => self.stack.push(Frame::new(prefix)),
                None if frame.exhausted => {
                    self.stack.pop();
                }
                None => {
                    //拉取下一页
                    let request = ListObjectsRequest::new(&frame.prefix, LIST_PAGE_SIZE)
                        .delimiter("/")
                        .continuation_token(frame.token.take());
                    let page = self.store.list_objects(&request).await?;
                    debug!(
                        prefix = %frame.prefix,
                        objects = page.objects.len(),
                        prefixes = page.common_prefixes.len(),
                        truncated = page.is_truncated,
                        "list page"
                    );
                    frame.exhausted = !page.is_truncated;
                    frame.token = page.next_continuation_token.clone();
                    if page.is_truncated && frame.token.is_none() {
                        return Err(Error::OssInvalidResponse(None));
                    }
                    for listed in page_entries(self.prefixer, &frame.prefix, page) {
                        let descend = (self.deep && listed.entry.is_dir()).then(|| listed.key.clone());
                        frame.pending.push_back(Pending::Item(listed));
                        if let Some(prefix) = descend {
                            frame.pending.push_back(Pending::Descend(prefix));
                        }
                    }
                }
            }
        }
    }
}

/// 按需分页列举root下的条目，`deep` 为true时在每个目录之后紧跟它的全部内容
///
/// 任何一页失败都会结束整个列举，已经返回的条目不受影响
pub(crate) fn walk<'a, S: ObjectStore + ?Sized>(
    store: &'a S,
    prefixer: &'a PathPrefixer,
    root: &str,
    deep: bool,
) -> BoxStream<'a, Result<Listed, Error>> {
    let walker = Walker {
        store,
        prefixer,
        deep,
        stack: vec![Frame::new(prefixer.prefix_directory_path(root))],
    };
    stream::try_unfold(walker, |mut walker| async move {
        let next = walker.next_listed().await?;
        Ok::<_, Error>(next.map(|listed| (listed, walker)))
    })
    .boxed()
}
