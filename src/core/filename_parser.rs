use crate::core::patterns::{
    BASELINE_FUNCTIONAL_VARIANT_RE, CWE580_EXCLUSION_RE, CWE_ID_RE, FUNCTIONNAME_C_RE,
    PRIMARY_FLOW_VARIANT_EXCLUSION_RE, PRIMARY_TESTCASE_FILENAME_RE, TESTCASE_FILENAME_RE,
};
use crate::errors::AppError;
use log::warn;
use regex::Captures;
use std::fmt;
use std::path::Path;

/// Source extensions a test case file can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
    Java,
    Header,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "c" => Some(Language::C),
            "cpp" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            "h" => Some(Language::Header),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Header => "h",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Fields of a test case file name.
///
/// The `Default` value is the "empty" record handed back for names that do
/// not follow the grammar: numbers are `0`, strings are empty and the
/// optional parts are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCaseFileName {
    pub cwe_number: u64,
    pub cwe_name: String,
    pub functional_variant_name: String,
    pub flow_variant_id: u64,
    pub subfile_id: Option<String>,
    pub extension: Option<Language>,
}

impl TestCaseFileName {
    /// Parses `name` with the full test case grammar. Only out of range
    /// numbers are logged.
    pub fn parse(name: &str) -> Option<Self> {
        TESTCASE_FILENAME_RE.captures(name).and_then(|caps| Self::from_captures(&caps))
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        fn text<'h>(caps: &Captures<'h>, group: &str) -> &'h str {
            caps.name(group).map(|m| m.as_str()).unwrap_or_default()
        }
        fn number(caps: &Captures<'_>, group: &str) -> Option<u64> {
            let digits = text(caps, group);
            match digits.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("WARNING: file \"{}\" has an out of range {} '{}': {}", &caps[0], group, digits, e);
                    None
                }
            }
        }
        Some(TestCaseFileName {
            cwe_number: number(caps, "cwe_number")?,
            cwe_name: text(caps, "cwe_name").to_string(),
            functional_variant_name: text(caps, "functional_variant_name").to_string(),
            flow_variant_id: number(caps, "flow_variant_id")?,
            subfile_id: caps
                .name("subfile_id")
                .map(|m| m.as_str().trim_start_matches('_').to_string()),
            extension: Language::from_extension(text(caps, "extension")),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Flow variant as it appears in file names (`01`, `81`, ...).
    pub fn flow_variant_token(&self) -> String {
        format!("{:02}", self.flow_variant_id)
    }

    /// The record as named CSV columns. An empty record yields empty cells.
    pub fn columns(&self) -> [(&'static str, String); 6] {
        let (cwe_number, flow_variant) = if self.is_empty() {
            (String::new(), String::new())
        } else {
            (self.cwe_number.to_string(), self.flow_variant_token())
        };
        [
            ("testcase_cwe_number", cwe_number),
            ("testcase_cwe_name", self.cwe_name.clone()),
            ("testcase_function_variant", self.functional_variant_name.clone()),
            ("testcase_flow_variant", flow_variant),
            ("testcase_subfile_id", self.subfile_id.clone().unwrap_or_default()),
            ("testcase_language", self.extension.map(|l| l.to_string()).unwrap_or_default()),
        ]
    }
}

/// Parses a primary or secondary test case file name.
///
/// Names outside the grammar are not an error: a warning is logged and the
/// empty record is returned so batch jobs can keep going.
pub fn parse_testcase_filename(name: &str) -> TestCaseFileName {
    let Some(caps) = TESTCASE_FILENAME_RE.captures(name) else {
        warn!("WARNING: file \"{}\" is not going to be parsed into parts! (blank values will be used)", name);
        return TestCaseFileName::default();
    };
    TestCaseFileName::from_captures(&caps).unwrap_or_default()
}

/// Parses `name` only if it is the one primary file of its test case.
pub fn parse_primary_testcase_filename(name: &str) -> Option<TestCaseFileName> {
    if CWE580_EXCLUSION_RE.is_match(name) {
        return None;
    }
    let caps = PRIMARY_TESTCASE_FILENAME_RE.captures(name)?;
    let flow_start = caps.name("flow_variant_id")?.start();
    if PRIMARY_FLOW_VARIANT_EXCLUSION_RE.is_match(&name[flow_start..]) {
        return None;
    }
    TestCaseFileName::from_captures(&caps)
}

pub fn is_primary_testcase_filename(name: &str) -> bool {
    parse_primary_testcase_filename(name).is_some()
}

/// True for the flow variant 01 file that stands for its functional variant.
pub fn is_baseline_functional_variant_filename(name: &str) -> bool {
    !CWE580_EXCLUSION_RE.is_match(name) && BASELINE_FUNCTIONAL_VARIANT_RE.is_match(name)
}

/// Strips the test case prefix off a C/C++ function identifier, e.g.
/// `CWE121_Stack__char_01_bad` becomes `bad`. Identifiers that do not embed a
/// test case name come back unchanged.
pub fn simplify_function_name(name: &str) -> String {
    FUNCTIONNAME_C_RE
        .captures(name)
        .and_then(|caps| caps.name("function_name"))
        .map_or_else(|| name.to_string(), |m| m.as_str().to_string())
}

/// Pulls the CWE id out of a test case path.
///
/// A basename starting with `CWE` yields its own id (`CWE121`). Otherwise the
/// path is taken to be an `sNN` split directory and the id is searched in the
/// full path and suffixed with the basename (`CWE121_s01`).
pub fn extract_cwe_id_from_path(path: &Path) -> Result<String, AppError> {
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let not_found = || AppError::Parse(format!("No CWE id found in path '{}'", path.display()));

    if basename.starts_with("CWE") {
        let caps = CWE_ID_RE.captures(&basename).ok_or_else(not_found)?;
        Ok(caps[1].to_string())
    } else {
        let full_path = path.to_string_lossy();
        let caps = CWE_ID_RE.captures(&full_path).ok_or_else(not_found)?;
        Ok(format!("{}_{}", &caps[1], basename))
    }
}

/// Makes a language label safe for use in file names (`C++` -> `Cpp`,
/// `C/C++` -> `C_Cpp`, `C#` -> `Csharp`).
pub fn encode_language(input_lang: &str) -> String {
    input_lang
        .replace('+', "p")
        .replace('/', "_")
        .replace('\\', "_")
        .replace('#', "sharp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn parses_a_plain_testcase() {
        let parsed = parse_testcase_filename("CWE121_Stack_Based_Buffer_Overflow__CWE129_fgets_01.c");
        assert_eq!(
            parsed,
            TestCaseFileName {
                cwe_number: 121,
                cwe_name: "Stack_Based_Buffer_Overflow".to_string(),
                functional_variant_name: "CWE129_fgets".to_string(),
                flow_variant_id: 1,
                subfile_id: None,
                extension: Some(Language::C),
            }
        );
    }

    #[test]
    fn parses_subfile_markers() {
        let cases = [
            ("CWE78_OS_Command_Injection__char_connect_socket_execl_54b.c", "b"),
            ("CWE476_NULL_Pointer_Dereference__int_81_bad.cpp", "bad"),
            ("CWE476_NULL_Pointer_Dereference__int_81_good1.cpp", "good1"),
            ("CWE190_Integer_Overflow__int_fgets_add_81_goodG2B.cpp", "goodG2B"),
            ("CWE190_Integer_Overflow__int_fgets_add_81_goodB2G.cpp", "goodB2G"),
            ("CWE36_Absolute_Path_Traversal__char_file_fopen_83_base.cpp", "base"),
        ];
        for (name, subfile) in cases {
            let parsed = TestCaseFileName::parse(name).unwrap_or_else(|| panic!("{} should parse", name));
            assert_eq!(parsed.subfile_id.as_deref(), Some(subfile), "{}", name);
        }
    }

    #[test]
    fn matching_ignores_case() {
        let parsed = TestCaseFileName::parse("cwe690_NULL_Deref__malloc_02.H").unwrap();
        assert_eq!(parsed.cwe_number, 690);
        assert_eq!(parsed.extension, Some(Language::Header));
    }

    #[test]
    fn unparsable_names_give_the_empty_record() {
        let parsed = parse_testcase_filename("main_linux.cpp");
        assert!(parsed.is_empty());
        assert!(parsed.columns().iter().all(|(_, value)| value.is_empty()));
        assert!(parse_testcase_filename("CWE121_x__y_01.txt").is_empty());
    }

    #[test]
    fn wide_cwe_numbers_still_parse() {
        let parsed = parse_testcase_filename("CWE99999999999_x__y_01.c");
        assert_eq!(parsed.cwe_number, 99_999_999_999);
        assert_eq!(parsed.functional_variant_name, "y");
        assert_eq!(parsed.flow_variant_id, 1);
    }

    #[test]
    fn numbers_past_u64_give_the_empty_record() {
        assert!(parse_testcase_filename("CWE99999999999999999999999_x__y_01.c").is_empty());
        assert!(TestCaseFileName::parse("CWE121_x__y_99999999999999999999999.c").is_none());
    }

    #[test]
    fn columns_use_file_name_spelling() {
        let parsed = parse_testcase_filename("CWE15_External_Control__w32_08b.c");
        let columns = parsed.columns();
        assert_eq!(columns[0], ("testcase_cwe_number", "15".to_string()));
        assert_eq!(columns[3], ("testcase_flow_variant", "08".to_string()));
        assert_eq!(columns[4], ("testcase_subfile_id", "b".to_string()));
        assert_eq!(columns[5], ("testcase_language", "c".to_string()));
    }

    #[test]
    fn primary_grammar_selects_one_file_per_testcase() {
        assert!(is_primary_testcase_filename("CWE121_Stack__char_01.c"));
        assert!(is_primary_testcase_filename("CWE121_Stack__char_51a.c"));
        assert!(is_primary_testcase_filename("CWE476_NULL__int_81a.cpp"));
        assert!(is_primary_testcase_filename("CWE400_Resource__Environment_for_loop_17_bad.java"));
        assert!(!is_primary_testcase_filename("CWE121_Stack__char_51b.c"));
        assert!(!is_primary_testcase_filename("CWE121_Stack__char_01.h"));
        assert!(!is_primary_testcase_filename("CWE476_NULL__int_81_bad.cpp"));
        assert!(!is_primary_testcase_filename("CWE476_NULL__int_82_BAD.cpp"));
        assert!(!is_primary_testcase_filename("CWE580_Clone_Without_Super__basic_01_bad.java"));
        assert!(is_primary_testcase_filename("CWE580_Clone_Without_Super__basic_01a.java"));
    }

    #[test]
    fn primary_exclusion_only_hits_flow_81_and_82() {
        assert!(is_primary_testcase_filename("CWE476_NULL__int_83_bad.cpp"));
        assert!(is_primary_testcase_filename("CWE476_NULL__int_812_bad.cpp"));
        let parsed = parse_primary_testcase_filename("CWE476_NULL__int_17_bad.cpp").unwrap();
        assert_eq!(parsed.subfile_id.as_deref(), Some("bad"));
    }

    #[test]
    fn baseline_grammar_only_accepts_flow_variant_01() {
        assert!(is_baseline_functional_variant_filename("CWE121_Stack__char_01.c"));
        assert!(is_baseline_functional_variant_filename("CWE121_Stack__char_01a.cpp"));
        assert!(is_baseline_functional_variant_filename("CWE400_Resource__env_01_bad.java"));
        assert!(is_baseline_functional_variant_filename("cwe400_Resource__env_01bad.java"));
        assert!(!is_baseline_functional_variant_filename("CWE121_Stack__char_01b.c"));
        assert!(!is_baseline_functional_variant_filename("CWE121_Stack__char_02.c"));
        assert!(!is_baseline_functional_variant_filename("CWE580_Clone__basic_01_bad.java"));
    }

    #[test]
    fn simplifies_function_names() {
        assert_eq!(simplify_function_name("CWE123_foo__bar_01_baz"), "baz");
        assert_eq!(simplify_function_name("CWE121_Stack__char_54b_badSink"), "badSink");
        assert_eq!(simplify_function_name("cwe121_Stack__char_01_good_helper"), "good_helper");
        assert_eq!(simplify_function_name("main"), "main");
        assert_eq!(simplify_function_name("CWE121_Stack__char_01.c"), "CWE121_Stack__char_01.c");
    }

    #[test]
    fn extracts_cwe_ids_from_paths() {
        let direct = PathBuf::from("/suite/testcases/CWE121_Stack_Based_Buffer_Overflow");
        assert_eq!(extract_cwe_id_from_path(&direct).unwrap(), "CWE121");

        let split = PathBuf::from("/suite/testcases/CWE121_Stack_Based_Buffer_Overflow/s01");
        assert_eq!(extract_cwe_id_from_path(&split).unwrap(), "CWE121_s01");

        let err = extract_cwe_id_from_path(&PathBuf::from("/suite/testcases/misc")).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn encodes_language_labels() {
        assert_eq!(encode_language("C++"), "Cpp");
        assert_eq!(encode_language("C/C++"), "C_Cpp");
        assert_eq!(encode_language(r"C\C++"), "C_Cpp");
        assert_eq!(encode_language("C#"), "Csharp");
        assert_eq!(encode_language("Java"), "Java");
    }

    proptest! {
        #[test]
        fn names_built_from_the_grammar_parse_back(
            cwe_number in 1u64..2000,
            cwe_name in "[A-Z][a-z]{1,8}(_[A-Z][a-z]{1,8}){0,3}",
            variant in "[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,3}",
            flow in 1u64..100,
            subfile in prop::option::of(prop_oneof![
                "[a-z]".prop_map(String::from),
                Just("bad".to_string()),
                (1u32..10).prop_map(|n| format!("good{}", n)),
                Just("base".to_string()),
                Just("goodB2G".to_string()),
                Just("goodG2B".to_string()),
            ]),
            ext in prop_oneof![Just("c"), Just("cpp"), Just("java"), Just("h")],
        ) {
            let suffix = match &subfile {
                Some(s) if s.len() == 1 => s.clone(),
                Some(s) => format!("_{}", s),
                None => String::new(),
            };
            let name = format!("CWE{}_{}__{}_{:02}{}.{}", cwe_number, cwe_name, variant, flow, suffix, ext);
            let parsed = TestCaseFileName::parse(&name).unwrap();
            prop_assert_eq!(parsed.cwe_number, cwe_number);
            prop_assert_eq!(parsed.cwe_name, cwe_name);
            prop_assert_eq!(parsed.functional_variant_name, variant);
            prop_assert_eq!(parsed.flow_variant_id, flow);
            prop_assert_eq!(parsed.subfile_id, subfile);
            prop_assert_eq!(parsed.extension.map(|l| l.extension()), Some(ext));
        }
    }
}
