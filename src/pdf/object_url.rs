//! オブジェクト URL - メモリ上のバイト列への一時的な参照

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// URL のスキーム部分
const SCHEME_PREFIX: &str = "blob:pdf-signer/";

/// 登録済みのバイト列
static REGISTRY: Lazy<Mutex<HashMap<Uuid, Arc<[u8]>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// バイト列への参照
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(Uuid);

impl ObjectUrl {
    /// バイト列を登録して URL を発行
    pub fn create(bytes: impl Into<Arc<[u8]>>) -> Self {
        let id = Uuid::new_v4();
        REGISTRY.lock().insert(id, bytes.into());
        log::debug!("オブジェクトURLを作成: {}{}", SCHEME_PREFIX, id);
        Self(id)
    }

    /// 登録済みのバイト列を取得 (失効済みなら None)
    pub fn resolve(&self) -> Option<Arc<[u8]>> {
        REGISTRY.lock().get(&self.0).cloned()
    }

    /// URL を失効させる
    pub fn revoke(&self) {
        if REGISTRY.lock().remove(&self.0).is_some() {
            log::debug!("オブジェクトURLを失効: {}", self);
        }
    }
}

/// スコープを抜けると失効する URL
#[derive(Debug)]
pub struct ObjectUrlGuard(ObjectUrl);

impl ObjectUrlGuard {
    pub fn new(url: ObjectUrl) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.0
    }
}

impl Drop for ObjectUrlGuard {
    fn drop(&mut self) {
        self.0.revoke();
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SCHEME_PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_until_revoked() {
        let url = ObjectUrl::create(b"%PDF-1.4".to_vec());
        assert_eq!(url.resolve().as_deref(), Some(&b"%PDF-1.4"[..]));

        url.revoke();
        assert!(url.resolve().is_none());

        // 二重の失効は無視される
        url.revoke();
    }

    #[test]
    fn display_uses_blob_scheme() {
        let url = ObjectUrl::create(vec![1, 2, 3]);
        let text = url.to_string();
        assert!(text.starts_with("blob:pdf-signer/"));
        assert!(Uuid::parse_str(&text["blob:pdf-signer/".len()..]).is_ok());
        url.revoke();
    }

    #[test]
    fn guard_revokes_on_drop() {
        let guard = ObjectUrlGuard::new(ObjectUrl::create(vec![9]));
        let url = guard.url().clone();
        assert!(url.resolve().is_some());
        drop(guard);
        assert!(url.resolve().is_none());
    }

    #[test]
    fn urls_are_independent() {
        let a = ObjectUrl::create(vec![1]);
        let b = ObjectUrl::create(vec![2]);
        assert_ne!(a, b);
        a.revoke();
        assert_eq!(b.resolve().as_deref(), Some(&[2u8][..]));
        b.revoke();
    }
}
