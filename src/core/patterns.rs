//! Fixed grammars and naming conventions of the test case corpus.
//!
//! Every test case file name follows
//! `CWE<number>_<cwe name>__<functional variant>_<flow variant><subfile>.<ext>`,
//! e.g. `CWE121_Stack_Based_Buffer_Overflow__CWE129_fgets_01.c`. All grammars
//! are matched case-insensitively.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// First line of every test case emitted by the template engine.
pub const ENGINE_SIGNATURE: &str = "/* TEMPLATE GENERATED TESTCASE FILE";

/// Marker comment on the line above `main()` in Java test cases.
pub const JAVA_MAIN_COMMENT: &str = "Below is the main()";

/// Marker comment on the line above `main()` in C/C++ test cases.
pub const C_CPP_MAIN_COMMENT: &str = "Below is the main()";

/// Heap size handed to every analysis tool that accepts one.
pub const TOOL_STUDY_MAX_JAVA_HEAP_SIZE: &str = "4096m";

/// Java test case lib directory, relative to a CWE directory.
pub const JAVA_TESTCASE_LIB: &str = r"..\..\..\lib";

/// C/C++ support directory, relative to a CWE directory.
pub const C_AND_CPP_TESTCASESUPPORT_DIR: &str = r"..\..\testcasesupport";

/// [`JAVA_TESTCASE_LIB`] as seen from an `sNN` split directory.
pub fn java_testcase_lib_split() -> String {
    format!(r"..\{}", JAVA_TESTCASE_LIB)
}

/// [`C_AND_CPP_TESTCASESUPPORT_DIR`] as seen from an `sNN` split directory.
pub fn c_and_cpp_testcasesupport_dir_split() -> String {
    format!(r"..\{}", C_AND_CPP_TESTCASESUPPORT_DIR)
}

/// Primary and secondary test case files.
pub const TESTCASE_FILENAME: &str = concat!(
    r"^cwe",
    r"(?P<cwe_number>\d+)",
    r"_",
    r"(?P<cwe_name>.*)",
    r"__",
    r"(?P<functional_variant_name>.*)",
    r"_",
    r"(?P<flow_variant_id>\d+)",
    r"_?",
    r"(?P<subfile_id>[a-z]{1}|(bad)|(good(\d)+)|(base)|(goodB2G)|(goodG2B))?",
    r"\.",
    r"(?P<extension>c|cpp|java|h)$",
);

/// Primary test case files only, before the exclusions in
/// [`PRIMARY_FLOW_VARIANT_EXCLUSION`] and [`CWE580_EXCLUSION`] are applied.
pub const PRIMARY_TESTCASE_FILENAME: &str = concat!(
    r"^cwe",
    r"(?P<cwe_number>\d+)",
    r"_",
    r"(?P<cwe_name>.*)",
    r"__",
    r"(?P<functional_variant_name>.*)",
    r"_",
    r"(?P<flow_variant_id>\d+)",
    r"_?",
    r"(?P<subfile_id>a|(_bad))?",
    r"\.",
    r"(?P<extension>c|cpp|java)$",
);

/// Tested against the text starting at the flow variant id. Flow variants 81
/// and 82 have their own `a` primary file, so their `_bad` file is not one.
pub const PRIMARY_FLOW_VARIANT_EXCLUSION: &str = r"^8[12]_bad";

/// CWE580 has an `a` file, so its `01_bad.java` is neither primary nor baseline.
pub const CWE580_EXCLUSION: &str = r"^CWE580.*01_bad.java";

/// Flow variant 01 files, one per functional variant.
pub const BASELINE_FUNCTIONAL_VARIANT: &str = r"^CWE\d+.*_01((a)|(_?bad)|)\.(c|cpp|java)?$";

/// C/C++ function identifiers that embed the test case name.
pub const FUNCTIONNAME_C: &str = r"^(CWE|cwe)(?P<cwe_number>\d+)_(?P<cwe_name>.*)__(?P<function_variant>.*)_(?P<flow_variant>\d+)(?P<subfile_id>[a-z]*)_(?P<function_name>[^.]*)$";

/// Counts non-flawed constructs in C test cases (not every good function).
pub const C_GOOD_FX_COUNTING: &str = r"good(\d+|G2B|B2G|G2B\d+|B2G\d+)";

/// Counts non-flawed constructs in Java test cases (not every good function).
pub const JAVA_GOOD_FX_COUNTING: &str = r"good(\d+|G2B|B2G|G2B\d+|B2G\d+)";

/// CWE id inside a file or path name. Case-sensitive.
pub const CWE_ID: &str = r"(CWE\d+)_";

/// Split test case directories: `CWE121_..._s01`, `CWE121_..._s02`, ...
pub const TESTCASE_SUBDIRECTORY: &str = r"CWE.*_s\d{2,}$";

fn compile(pattern: &str, case_insensitive: bool) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .unwrap_or_else(|e| panic!("built-in grammar '{}' failed to compile: {}", pattern, e))
}

pub static TESTCASE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| compile(TESTCASE_FILENAME, true));
pub static PRIMARY_TESTCASE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(PRIMARY_TESTCASE_FILENAME, true));
pub static PRIMARY_FLOW_VARIANT_EXCLUSION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(PRIMARY_FLOW_VARIANT_EXCLUSION, true));
pub static CWE580_EXCLUSION_RE: LazyLock<Regex> = LazyLock::new(|| compile(CWE580_EXCLUSION, true));
pub static BASELINE_FUNCTIONAL_VARIANT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(BASELINE_FUNCTIONAL_VARIANT, true));
pub static FUNCTIONNAME_C_RE: LazyLock<Regex> = LazyLock::new(|| compile(FUNCTIONNAME_C, true));
pub static C_GOOD_FX_COUNTING_RE: LazyLock<Regex> = LazyLock::new(|| compile(C_GOOD_FX_COUNTING, true));
pub static JAVA_GOOD_FX_COUNTING_RE: LazyLock<Regex> = LazyLock::new(|| compile(JAVA_GOOD_FX_COUNTING, true));
pub static CWE_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile(CWE_ID, false));
pub static TESTCASE_SUBDIRECTORY_RE: LazyLock<Regex> = LazyLock::new(|| compile(TESTCASE_SUBDIRECTORY, true));

/// Number of good-construct markers in a C/C++ source text.
pub fn count_c_good_constructs(source: &str) -> usize {
    C_GOOD_FX_COUNTING_RE.find_iter(source).count()
}

/// Number of good-construct markers in a Java source text.
pub fn count_java_good_constructs(source: &str) -> usize {
    JAVA_GOOD_FX_COUNTING_RE.find_iter(source).count()
}

pub fn is_testcase_subdirectory(name: &str) -> bool {
    TESTCASE_SUBDIRECTORY_RE.is_match(name)
}
