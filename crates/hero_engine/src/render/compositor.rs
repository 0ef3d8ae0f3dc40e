//! # Scene Compositor
//!
//! Turns the world's drawable components into draw calls.
//!
//! 1. Sprites, then images, each in query order, skipping invisible ones
//! 2. Stable sort by z-order, lowest first
//! 3. Each item is drawn centered on its entity under
//!    `current * translate * rotate * scale`; the previous transform and
//!    alpha are restored afterwards
//! 4. Text labels last, in query order, centered on the entity position and
//!    never rotated or scaled

use std::sync::Arc;

use super::rasterizer::Rasterizer;
use super::snapshot::{DrawItem, DrawKind, SceneSnapshot, TextItem};
use crate::ecs::components::{Drawable, ImageSprite, Sprite, Text, Transform};
use crate::ecs::{Component, World};

/// Stateless scene compositor
#[derive(Debug, Default, Clone, Copy)]
pub struct SceneCompositor;

impl SceneCompositor {
    /// Capture every visible drawable in draw order
    pub fn collect(world: &World) -> SceneSnapshot {
        let mut items = Vec::new();
        Self::gather::<Sprite>(world, &mut items, |sprite| {
            (sprite.width, sprite.height, DrawKind::Rect { color: sprite.color })
        });
        Self::gather::<ImageSprite>(world, &mut items, |image| {
            (
                image.width,
                image.height,
                DrawKind::Image {
                    image: Arc::clone(&image.image),
                    opacity: image.opacity(),
                },
            )
        });

        // Stable: equal z-orders keep gather order
        items.sort_by_key(|item| item.z_order);

        let texts = world
            .query::<(Transform, Text)>()
            .into_iter()
            .filter_map(|entity| {
                let transform = world.get::<Transform>(entity)?;
                let text = world.get::<Text>(entity)?;
                text.visible.then(|| TextItem {
                    entity,
                    text: text.text.clone(),
                    font: text.font.clone(),
                    color: text.color,
                    position: transform.position,
                })
            })
            .collect();

        SceneSnapshot {
            frame: 0,
            items,
            texts,
        }
    }

    fn gather<D: Component + Drawable>(
        world: &World,
        items: &mut Vec<DrawItem>,
        describe: impl Fn(&D) -> (f32, f32, DrawKind),
    ) {
        for entity in world.query::<(Transform, D)>() {
            let (Some(transform), Some(drawable)) =
                (world.get::<Transform>(entity), world.get::<D>(entity))
            else {
                continue;
            };
            if !drawable.is_visible() {
                continue;
            }
            let (width, height, kind) = describe(drawable);
            items.push(DrawItem {
                entity,
                z_order: drawable.z_order(),
                transform: transform.to_matrix(),
                width,
                height,
                kind,
            });
        }
    }

    /// Emit a snapshot's draw calls
    pub fn render(snapshot: &SceneSnapshot, rasterizer: &mut dyn Rasterizer) {
        for item in &snapshot.items {
            Self::draw_item(item, rasterizer);
        }
        for text in &snapshot.texts {
            Self::draw_text(text, rasterizer);
        }
    }

    /// Collect and render in one step
    pub fn render_world(world: &World, rasterizer: &mut dyn Rasterizer) {
        Self::render(&Self::collect(world), rasterizer);
    }

    fn draw_item(item: &DrawItem, rasterizer: &mut dyn Rasterizer) {
        let prior_transform = rasterizer.transform();
        let prior_alpha = rasterizer.alpha();
        rasterizer.set_transform(prior_transform * item.transform);

        let (x, y) = (-item.width / 2.0, -item.height / 2.0);
        match &item.kind {
            DrawKind::Rect { color } => {
                rasterizer.fill_rect(x, y, item.width, item.height, *color);
            }
            DrawKind::Image { image, opacity } => {
                if *opacity < 1.0 {
                    rasterizer.set_alpha(*opacity);
                }
                rasterizer.draw_image(image, x, y, item.width, item.height);
            }
        }

        rasterizer.set_alpha(prior_alpha);
        rasterizer.set_transform(prior_transform);
    }

    fn draw_text(item: &TextItem, rasterizer: &mut dyn Rasterizer) {
        let metrics = rasterizer.text_metrics(&item.text, &item.font);
        let x = item.position.x - metrics.width / 2.0;
        let y = item.position.y + metrics.height / 2.0 - metrics.descent;
        rasterizer.draw_text(&item.text, &item.font, item.color, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;
    use crate::ecs::components::Color;
    use crate::foundation::math::{affine, Mat3, Vec2};
    use crate::render::commands::{CommandRecorder, DrawCommand};
    use approx::assert_relative_eq;

    fn sprite_at(world: &mut World, x: f32, z: i32) -> crate::ecs::Entity {
        world.spawn((
            Transform::new(x, 0.0),
            Sprite::new(10.0, 10.0, Color::WHITE).with_z_order(z),
        ))
    }

    #[test]
    fn test_z_order_is_stable() {
        let mut world = World::new();
        let a = sprite_at(&mut world, 0.0, 2);
        let b = sprite_at(&mut world, 1.0, 1);
        let c = sprite_at(&mut world, 2.0, 2);
        let d = sprite_at(&mut world, 3.0, 0);
        world.refresh();

        let order: Vec<_> = SceneCompositor::collect(&world)
            .items
            .iter()
            .map(|item| item.entity)
            .collect();
        assert_eq!(order, vec![d, b, a, c]);
    }

    #[test]
    fn test_sprites_gathered_before_images() {
        let mut world = World::new();
        let image = world.spawn((
            Transform::default(),
            ImageSprite::from_image(Arc::new(ImageData::solid_color(2, 2, [0; 4]))),
        ));
        let sprite = sprite_at(&mut world, 0.0, 0);
        world.refresh();

        let order: Vec<_> = SceneCompositor::collect(&world)
            .items
            .iter()
            .map(|item| item.entity)
            .collect();
        assert_eq!(order, vec![sprite, image]);
    }

    #[test]
    fn test_invisible_drawables_excluded() {
        let mut world = World::new();
        let hidden = sprite_at(&mut world, 0.0, 0);
        world.get_mut::<Sprite>(hidden).unwrap().set_visible(false);
        let mut label = Text::new("hidden");
        label.set_visible(false);
        world.spawn((Transform::default(), label));
        world.refresh();

        assert!(SceneCompositor::collect(&world).is_empty());
    }

    #[test]
    fn test_rect_centered_and_state_restored() {
        let mut world = World::new();
        world.spawn((
            Transform::new(100.0, 50.0).with_rotation(0.5).with_scale(2.0, 3.0),
            Sprite::new(20.0, 10.0, Color::RED),
        ));
        world.refresh();

        let base = affine::translation(Vec2::new(7.0, 7.0));
        let mut recorder = CommandRecorder::new();
        recorder.set_transform(base);
        SceneCompositor::render_world(&world, &mut recorder);

        let expected = base * affine::compose(Vec2::new(100.0, 50.0), 0.5, Vec2::new(2.0, 3.0));
        match &recorder.commands()[0] {
            DrawCommand::FillRect {
                transform,
                x,
                y,
                width,
                height,
                color,
                ..
            } => {
                assert_relative_eq!(*transform, expected, epsilon = 1e-5);
                assert_relative_eq!(*x, -10.0);
                assert_relative_eq!(*y, -5.0);
                assert_relative_eq!(*width, 20.0);
                assert_relative_eq!(*height, 10.0);
                assert_eq!(*color, Color::RED);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_relative_eq!(recorder.transform(), base);
        assert_relative_eq!(recorder.alpha(), 1.0);
    }

    #[test]
    fn test_image_opacity_applied_then_restored() {
        let mut world = World::new();
        let mut faded = ImageSprite::from_image(Arc::new(ImageData::solid_color(4, 4, [0; 4])));
        faded.set_opacity(0.25);
        world.spawn((Transform::default(), faded));
        world.spawn((
            Transform::default(),
            ImageSprite::from_image(Arc::new(ImageData::solid_color(4, 4, [0; 4]))).with_z_order(1),
        ));
        world.refresh();

        let mut recorder = CommandRecorder::new();
        SceneCompositor::render_world(&world, &mut recorder);

        let alphas: Vec<f32> = recorder
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Image { alpha, .. } => *alpha,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(alphas, vec![0.25, 1.0]);
        assert_relative_eq!(recorder.alpha(), 1.0);
    }

    #[test]
    fn test_text_drawn_last_and_centered() {
        let mut world = World::new();
        world.spawn((Transform::new(200.0, 100.0).with_rotation(1.0), Text::new("abcd")));
        sprite_at(&mut world, 0.0, 5);
        world.refresh();

        let mut recorder = CommandRecorder::new();
        SceneCompositor::render_world(&world, &mut recorder);

        let commands = recorder.commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        let font = crate::ecs::components::Font::default();
        let metrics = recorder.text_metrics("abcd", &font);
        match &commands[1] {
            DrawCommand::Text { text, x, y, transform, .. } => {
                assert_eq!(text, "abcd");
                assert_relative_eq!(*x, 200.0 - metrics.width / 2.0);
                assert_relative_eq!(*y, 100.0 + metrics.height / 2.0 - metrics.descent);
                assert_relative_eq!(*transform, Mat3::identity());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
