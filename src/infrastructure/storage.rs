//! 键值存储基础设施
//!
//! 只提供按键读取和按键覆盖写入两种操作，没有事务和过期。

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("存储读写失败: {0}")]
    Io(#[from] io::Error),
    #[error("无效的存储键: {0:?}")]
    InvalidKey(String),
    #[error("序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// 字符串键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// 运行时选择后端时使用的类型
pub type DynStore = Box<dyn KeyValueStore + Send>;

/// 键只允许字母、数字、`-` 和 `_`
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// 内存存储，进程退出即丢失
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 文件存储：每个键对应 `<data_dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// 打开存储目录，不存在时创建
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        // 先写临时文件再重命名，避免留下写了一半的内容
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("写入存储槽 {} ({} 字节)", path.display(), value.len());
        Ok(())
    }
}

/// 读写都可能失败的存储，用于测试降级路径
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct UnavailableStore {
    pub fail_reads: bool,
}

#[cfg(test)]
impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(io::Error::new(io::ErrorKind::Other, "store offline").into());
        }
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(io::Error::new(io::ErrorKind::Other, "store offline").into())
    }
}
