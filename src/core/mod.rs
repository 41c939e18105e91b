// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core infrastructure: subprocess execution.

pub mod process;
