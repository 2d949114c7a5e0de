use super::{Position, Renderer};
use crate::color::ColorTable;
use log::debug;
use std::io::Write;

/// Scene preamble: sphere macro, camera, lighting, and the three axes
const PREAMBLE: &str = "\
#macro my_sphere(xPos, yPos, zPos)
    sphere { <xPos,yPos,zPos>, 0.2 texture { pigment {color <0, 0, 1>} }
finish {phong 0.9} }
#end

camera {
   orthographic
   location <3, 6, -10>
   look_at <0, 4, 0>
}

light_source { <-1, -1, -1> color <1, 1, 1>}

sky_sphere { pigment {color <1, 1, 1>} }

cylinder {
 <0, 20, 0>
 <0, -20, 0>
 0.05
 texture {pigment {color <0.66, 0.625, 0.66>}}
 finish {ambient 0.5}
}

cylinder {
 <20, 0, 0>
 <-20, 0, 0>
 0.05
 texture {pigment {color <1, 0, 0>}}
 finish {ambient 0.5}
}

cylinder {
 <0, 0, 20>
 <0, 0, -20>
 0.05
 texture {pigment {color <1, 0, 0>}}
 finish {ambient 0.5}
}
";

/// Sphere radius, in scene units
const SPHERE_RADIUS: f64 = 0.2;

/// Renderer that writes a POV-Ray scene description
///
/// Each marker becomes a small sphere at `<x, layer, y>`, so time runs up the
/// scene's Y axis.  Labels are not drawn.
///
/// Every cell handed to [`Renderer::marker`] becomes a sphere, whatever its
/// fill.  When painting is restricted to a single tile, the cells outside it
/// keep the default white fill and show up as white spheres around it.
pub struct PovRenderer<'a, W> {
    out: W,
    colors: &'a ColorTable,
}

impl<'a, W: Write> PovRenderer<'a, W> {
    /// Builds a new POV-Ray renderer writing to the given stream
    pub fn new(out: W, colors: &'a ColorTable) -> Self {
        Self { out, colors }
    }

    /// Unwraps the renderer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for PovRenderer<'_, W> {
    fn header(&mut self) -> std::io::Result<()> {
        self.out.write_all(PREAMBLE.as_bytes())
    }

    fn footer(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "// End of the povray file")
    }

    fn marker(
        &mut self,
        pos: &Position,
        _stroke: &str,
        fill: &str,
    ) -> std::io::Result<()> {
        debug!(
            "{{ pos: {} {} {}; color: {} }}",
            pos.layer,
            pos.x,
            pos.y,
            self.colors.hex(fill)
        );
        let [r, g, b] = self.colors.rgb(fill).to_fractions();
        writeln!(
            self.out,
            " sphere {{ <{}, {}, {}>, {SPHERE_RADIUS} texture {{ pigment {{\
             color <{r:.4}, {g:.4}, {b:.4}>}} }} finish {{phong 0.9}} }}",
            pos.x, pos.layer, pos.y,
        )
    }

    fn label(&mut self, _pos: &Position, _text: &str) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scene() {
        let colors = ColorTable::builtin();
        let mut pov = PovRenderer::new(vec![], &colors);
        let pos = Position {
            layer: 3,
            x: 4,
            y: 7,
            px: 0,
            py: 0,
        };
        pov.header().unwrap();
        pov.marker(&pos, "black", "yellow").unwrap();
        pov.label(&pos, "1,2,3").unwrap();
        pov.footer().unwrap();

        let text = String::from_utf8(pov.into_inner()).unwrap();
        assert!(text.starts_with("#macro my_sphere"));
        assert_eq!(text.matches("cylinder {").count(), 3);
        assert!(text.contains(
            " sphere { <4, 3, 7>, 0.2 texture { pigment {\
             color <1.0000, 1.0000, 0.0000>} } finish {phong 0.9} }\n"
        ));
        assert!(!text.contains("1,2,3"));
        assert!(text.ends_with("// End of the povray file\n"));
    }

    #[test]
    fn unknown_fill_is_black() {
        let colors = ColorTable::default();
        let mut out = vec![];
        let mut pov = PovRenderer::new(&mut out, &colors);
        let pos = Position {
            layer: 1,
            x: 0,
            y: 0,
            px: 0,
            py: 0,
        };
        pov.marker(&pos, "black", "mauve").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("color <0.0000, 0.0000, 0.0000>"));
    }
}
