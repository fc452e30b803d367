//! Application Error - Unified error type for the application
//!
//! Defines the [`AppError`] struct.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Code reported when an error carries no domain-specific code.
pub const GENERIC_ERROR_CODE: &str = "ERR_000";

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `code` - クライアント向けの安定したエラーコード (`ERR_0NN`)
/// * `message` - ユーザー向けのエラーメッセージ
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Conflict, "EMAIL ALREADY EXISTS")
///     .with_code("ERR_005");
/// assert_eq!(err.code(), "ERR_005");
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// エラーコード
    code: Option<Cow<'static, str>>,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// エラーコードを設定
    #[inline]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// エラーコードを取得（未設定なら [`GENERIC_ERROR_CODE`]）
    #[inline]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or(GENERIC_ERROR_CODE)
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("code", &self.code())
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.kind, self.code(), self.message)
    }
}

impl Error for AppError {}
