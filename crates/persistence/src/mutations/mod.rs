// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Multi-statement writes (a booking transition plus its room flag, a batch
//! of rooms, a booking insert with its overlap re-check) run inside one
//! transaction so they either all land or none do.

pub mod bookings;
pub mod guests;
pub mod rooms;
