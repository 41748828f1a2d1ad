// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `guests`: guest lookups, name search, VIP and booking counts
//! - `rooms`: room lookups, type and price filters, availability for a stay
//! - `bookings`: booking lookups, joined details, date-range and status lists

pub mod bookings;
pub mod guests;
pub mod rooms;
