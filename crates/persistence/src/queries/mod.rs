// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.

pub mod rotas;

pub use rotas::{get_rota, list_rota_names, scan_expired_shifts};
