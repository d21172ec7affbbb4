// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和巴西葡萄牙语
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "pt-BR"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 已支持的语言
pub fn available_locales() -> Vec<String> {
    rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect()
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use mrp_critical_items::i18n::t;
/// let msg = t("report.sheet_name");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 按指定语言翻译（不修改全局语言）
pub fn t_locale(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use mrp_critical_items::i18n::t_with_args;
/// let msg = t_with_args("cli.items_found", &[("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 按指定语言翻译（带参数，不修改全局语言）
pub fn t_locale_with_args(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_locale(key, locale);
    for (k, v) in args {
        result = result.replace(&format!("%{{{}}}", k), v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        assert_eq!(current_locale(), "pt-BR");

        set_locale("en");
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(t("report.sheet_name"), "Critical Items");

        set_locale("pt-BR");
        assert_eq!(t("report.sheet_name"), "Itens Críticos");

        set_locale("en");
    }

    #[test]
    fn test_translate_explicit_locale() {
        assert_eq!(t_locale("report.sheet_name", "pt-BR"), "Itens Críticos");
        assert_eq!(t_locale("report.sheet_name", "en"), "Critical Items");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        let msg = t_with_args("cli.items_found", &[("count", "7")]);
        assert!(msg.contains('7'));
        assert!(msg.contains("critical items"));

        set_locale("pt-BR");
        let msg = t_with_args("cli.items_found", &[("count", "7")]);
        assert!(msg.contains("itens críticos"));

        set_locale("en");
    }

    #[test]
    fn test_translate_explicit_locale_with_args() {
        let msg = t_locale_with_args("cli.items_found", "pt-BR", &[("count", "3")]);
        assert_eq!(msg, "3 itens críticos identificados.");
    }

    #[test]
    fn test_available_locales() {
        let locales = available_locales();
        assert!(locales.contains(&"en".to_string()));
        assert!(locales.contains(&"pt-BR".to_string()));
    }
}
