// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_counters;
mod test_flow;
mod utils;
