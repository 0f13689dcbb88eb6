// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
use error_chain::*;

use crate::cells::Cartesian2DCoordinate;

error_chain! {

    errors {
        InvalidSize(size: usize) {
            description("invalid grid size")
            display("invalid grid size {}: a grid side must be at least 1 and its cells addressable", size)
        }
        OutOfBounds(coord: Cartesian2DCoordinate, side: usize) {
            description("grid coordinate out of bounds")
            display("coordinate {} is outside the {}x{} grid", coord, side, side)
        }
    }
}
