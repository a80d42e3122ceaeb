//! テーマとスタイルヘルパー
//!
//! インラインスタイルで表現しにくい状態クラスをここに集約する。

/// 埋め込みCSSを取得
pub fn get_embedded_css() -> &'static str {
    r#"
    * {
        box-sizing: border-box;
    }

    body {
        margin: 0;
        padding: 0;
    }

    .main-window {
        min-height: 100vh;
    }

    .stat-card {
        transition: transform 0.2s ease, box-shadow 0.2s ease;
    }

    .stat-card:hover {
        transform: translateY(-2px);
        box-shadow: 0 4px 16px rgba(0, 0, 0, 0.15);
    }

    .chart-card {
        overflow: hidden;
    }

    .chart-controls .btn {
        transition: all 0.2s ease;
    }

    .chart-controls .btn:hover {
        opacity: 0.85;
    }

    .chart-controls .btn.active {
        box-shadow: 0 2px 6px rgba(102, 126, 234, 0.4);
    }

    .activity-item:last-child {
        border-bottom: none;
    }

    .alert-item.alert-high {
        background: #fee2e2;
        border-left: 4px solid #ff5252;
    }

    .alert-item.alert-medium {
        background: #fef3c7;
        border-left: 4px solid #f59e0b;
    }

    .alert-item.alert-low {
        background: #f3f4f6;
        border-left: 4px solid #9ca3af;
    }

    .no-data {
        color: #9ca3af;
    }

    .loading-state {
        color: #9ca3af;
    }

    @media (max-width: 1100px) {
        .stats-grid {
            grid-template-columns: repeat(2, 1fr) !important;
        }
    }
    "#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_css_contains_severity_classes() {
        let css = get_embedded_css();
        assert!(css.contains(".alert-item.alert-high"));
        assert!(css.contains(".alert-item.alert-medium"));
        assert!(css.contains(".alert-item.alert-low"));
    }
}
