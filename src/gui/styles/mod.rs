// スタイルモジュール

pub mod theme;
