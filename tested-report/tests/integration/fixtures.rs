// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indoc::indoc;

/// Output captured from `dub test` on a small project using `tested`, including build noise.
pub(crate) static DUB_TEST_OUTPUT: &str = indoc! {r#"
    Performing "unittest" build using /usr/bin/dmd for x86_64.
    tested 0.9.5: target for configuration "library" is up to date.
    calc ~master: building configuration "calc-test-library"...
    source/calc/parse.d(14,9): Deprecation: function `std.string.removechars` is deprecated
    Linking...
    Running ./calc-test-library
    PASS "adds numbers" (calc.ops.Calculator.__unittestL10_3) after 0.002 s
    PASS "" (calc.ops.Calculator.__unittestL31_4) after 0.000 s
    FAIL "divides by zero" (calc.ops.Calculator.__unittestL48_5) after 0.013 s: core.exception.AssertError@source/calc/ops.d(52): Assertion failure
    PASS "" (calc.parse.Tokenizer.__unittestL7_0) after 0.104 s
    FAIL "" (calc.parse.Tokenizer.__unittestL66_1) after 1.230 s
    PASS "round trip" (calc.format_all) after 2.500 s
    2 of 6 tests failed.
    Program exited with code 1
"#};
