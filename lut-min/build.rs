// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

fn main() {
    lalrpop::process_root().unwrap();
}
