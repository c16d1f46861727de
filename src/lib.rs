/*
 * Responsibility
 * - crate のモジュール構成
 * - tests/ から router と state を組み立てられるように公開する
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
pub mod validation;
