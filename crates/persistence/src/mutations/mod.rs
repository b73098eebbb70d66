// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations for the persistence layer.

pub mod rotas;

pub use rotas::{delete_all_rotas, put_rota, update_shift, update_shift_if};
