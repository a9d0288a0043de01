//! # Rand-a-Pizza API サーバー
//!
//! ランダムピザ生成、レシピ保存・履歴、認証、ビジネスダッシュボードの
//! HTTP API を提供する。
//!
//! ## モジュール構成
//!
//! - `app`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: API エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: 認証ガード、セキュリティヘッダー
//! - `usecase`: ビジネスロジック

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
